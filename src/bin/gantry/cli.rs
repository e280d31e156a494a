//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Gantry - emits CMake package metadata from a resolved dependency graph
#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate conan-packages.cmake from the resolved dependency graph
    Generate(GenerateArgs),

    /// Copy runtime artifacts into local bin/lib staging directories
    Imports(ImportsArgs),

    /// Show the package identity and surface report
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory holding name-version.txt and gantry.toml
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to the engine-emitted graph file (defaults to the configured location)
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Output path for the generated manifest
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportsArgs {
    /// Directory holding name-version.txt and gantry.toml
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to the engine-emitted graph file (defaults to the configured location)
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Directory receiving the bin/lib staging folders
    #[arg(long, default_value = ".")]
    pub dest: PathBuf,

    /// Show what would be copied without copying
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Directory holding name-version.txt
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
