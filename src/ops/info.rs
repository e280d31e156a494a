//! Package surface reporting.
//!
//! This package aggregates dependencies for the consuming build. It exposes
//! no linkable libraries of its own, and its identity key ignores build
//! configuration entirely: every configuration collapses to the same key.

use serde::Serialize;

use crate::core::descriptor::PackageDescriptor;
use crate::util::hash::Fingerprint;

/// Identity mode marker for the package key.
pub const PACKAGE_ID_MODE: &str = "header-only";

/// The package's externally visible surface.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub name: String,
    pub version: String,

    /// Always empty: nothing of this package's own is linked
    pub libs: Vec<String>,

    pub package_id_mode: String,
    pub identity_key: String,
}

/// Build the package report for an identity.
pub fn package_report(descriptor: &PackageDescriptor) -> PackageReport {
    PackageReport {
        name: descriptor.name.clone(),
        version: descriptor.version.clone(),
        libs: Vec::new(),
        package_id_mode: PACKAGE_ID_MODE.to_string(),
        identity_key: identity_key(descriptor),
    }
}

/// Header-only identity key: a fingerprint of name and version only.
pub fn identity_key(descriptor: &PackageDescriptor) -> String {
    let mut fp = Fingerprint::new();
    fp.update_str(&descriptor.name)
        .update_str(&descriptor.version)
        .update_str(PACKAGE_ID_MODE);
    fp.finish()
}
