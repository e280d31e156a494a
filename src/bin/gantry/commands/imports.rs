//! `gantry imports` command

use anyhow::Result;

use crate::cli::ImportsArgs;
use gantry::ops::imports::{import_runtime_artifacts, ImportOptions};

pub fn execute(args: ImportsArgs) -> Result<()> {
    let mut opts = ImportOptions::new(args.project_dir)
        .with_dest_dir(args.dest)
        .with_dry_run(args.dry_run);
    if let Some(graph) = args.graph {
        opts = opts.with_graph_path(graph);
    }

    let result = import_runtime_artifacts(&opts)?;

    if args.dry_run {
        eprintln!("     Would import {} files", result.copied.len());
    } else {
        eprintln!("     Imported {} files", result.copied.len());
    }

    Ok(())
}
