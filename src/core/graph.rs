//! Resolved dependency graph, as emitted by the external engine.
//!
//! Resolution, fetching, and caching all happen on the engine side; this
//! adapter only reads the result from the engine's JSON metadata file. The
//! file's array order is the resolver's iteration order and is preserved
//! exactly, which is what makes re-generation byte-identical.

use std::collections::BTreeMap;
use std::path::Path;

use semver::{Version, VersionReq};
use serde::Deserialize;

use crate::core::error::RecipeError;

/// One resolved dependency. Read-only: the recipe never mutates records.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyRecord {
    /// Declared package name.
    pub name: String,

    /// Resolved version string. Dependency versions are not semver
    /// (four-segment versions such as `1.3.216.0` occur), so this stays an
    /// opaque string throughout.
    pub version: String,

    /// Package root folder, verbatim from the engine. May contain
    /// backslashes on Windows-hosted engines.
    pub rootpath: String,

    /// Per-generator package name overrides.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl DependencyRecord {
    /// Build-system package name for a generator, falling back to the
    /// declared name when the generator has no override.
    pub fn build_system_name(&self, generator: &str) -> &str {
        self.names
            .get(generator)
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

/// The engine-resolved dependency graph.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyGraph {
    /// Version of the engine that produced this file.
    pub engine_version: String,

    /// Resolved records, in resolver iteration order.
    pub dependencies: Vec<DependencyRecord>,
}

impl DependencyGraph {
    /// Load a graph file and gate on the engine version requirement.
    pub fn load(path: &Path, required: &str) -> Result<Self, RecipeError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RecipeError::GraphRead {
            path: path.to_path_buf(),
            source,
        })?;

        let graph: DependencyGraph =
            serde_json::from_str(&contents).map_err(|source| RecipeError::GraphFormat {
                path: path.to_path_buf(),
                source,
            })?;

        graph.check_engine_version(required)?;
        Ok(graph)
    }

    /// Verify that the producing engine satisfies `required`.
    fn check_engine_version(&self, required: &str) -> Result<(), RecipeError> {
        let requirement =
            VersionReq::parse(required).map_err(|e| RecipeError::Configuration {
                reason: format!("invalid engine requirement `{}`: {}", required, e),
            })?;

        let found =
            Version::parse(&self.engine_version).map_err(|_| RecipeError::EngineVersion {
                found: self.engine_version.clone(),
                required: required.to_string(),
            })?;

        if !requirement.matches(&found) {
            return Err(RecipeError::EngineVersion {
                found: self.engine_version.clone(),
                required: required.to_string(),
            });
        }

        Ok(())
    }

    /// Declared dependency names, in resolver order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.name.as_str())
    }

    /// Resolved records, in resolver order.
    pub fn records(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.dependencies.iter()
    }
}
