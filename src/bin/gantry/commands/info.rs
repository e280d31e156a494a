//! `gantry info` command

use anyhow::Result;

use crate::cli::InfoArgs;
use gantry::core::error::logged;
use gantry::core::PackageDescriptor;
use gantry::ops::info::package_report;

pub fn execute(args: InfoArgs) -> Result<()> {
    let descriptor = logged("resolve identity", || {
        PackageDescriptor::load(&args.project_dir)
    })?;
    let report = package_report(&descriptor);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("name:        {}", report.name);
        println!("version:     {}", report.version);
        println!("libs:        (none)");
        println!(
            "package id:  {} ({})",
            report.identity_key, report.package_id_mode
        );
    }

    Ok(())
}
