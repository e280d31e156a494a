//! High-level operations.
//!
//! This module contains the implementation of Gantry commands.

pub mod generate;
pub mod imports;
pub mod info;

pub use generate::{generate, GenerateOptions, GenerateResult};
pub use imports::{import_runtime_artifacts, ImportOptions, ImportResult, ImportedFile};
pub use info::{identity_key, package_report, PackageReport, PACKAGE_ID_MODE};
