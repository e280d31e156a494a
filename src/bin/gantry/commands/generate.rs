//! `gantry generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use gantry::ops::generate::{generate, GenerateOptions};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let mut opts = GenerateOptions::new(args.project_dir);
    if let Some(graph) = args.graph {
        opts = opts.with_graph_path(graph);
    }
    if let Some(out) = args.out {
        opts = opts.with_output_path(out);
    }

    let result = generate(&opts)?;

    eprintln!(
        "     Generated {} for {} ({} dependencies)",
        result.manifest_path.display(),
        result.descriptor.reference(),
        result.dependency_count
    );

    Ok(())
}
