//! Recipe configuration (`gantry.toml`) and dependency option adjustment.
//!
//! The config is optional: every field defaults to the recipe's stock
//! declarations, so a project with no `gantry.toml` gets the standard
//! vulkan + glfw dependency set.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::RecipeError;

/// Name of the recipe config file, resolved against the project directory.
pub const RECIPE_FILE_NAME: &str = "gantry.toml";

/// Recipe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    /// Resolving-engine settings
    pub engine: EngineConfig,

    /// Declared dependencies, `name/version` references
    pub requires: Vec<String>,

    /// Dependency option adjustments
    pub options: OptionsConfig,

    /// Runtime artifact copy rules
    pub imports: Vec<ImportRule>,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        RecipeConfig {
            engine: EngineConfig::default(),
            requires: vec!["vulkan/1.3.216.0".to_string(), "glfw/3.3.7".to_string()],
            options: OptionsConfig::default(),
            imports: default_imports(),
        }
    }
}

/// Settings describing the external resolving engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Version requirement the engine must satisfy
    pub required: String,

    /// Generator id used to look up build-system package names
    pub generator: String,

    /// Relative path of the engine-emitted graph file
    pub graph: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            required: ">=1.43.0".to_string(),
            generator: "cmake_find_package".to_string(),
            graph: "conanbuildinfo.json".to_string(),
        }
    }
}

/// Dependency option adjustments applied before resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OptionsConfig {
    /// The one dependency whose `shared` option is forced on
    pub force_shared: String,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        OptionsConfig {
            force_shared: "vulkan".to_string(),
        }
    }
}

/// One artifact copy rule: glob `pattern` under `<rootpath>/<src>` of every
/// resolved package, copy matches into `<dest>/<dst>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
    pub pattern: String,
    pub src: String,
    pub dst: String,
}

fn default_imports() -> Vec<ImportRule> {
    vec![
        ImportRule {
            pattern: "*.dll".to_string(),
            src: "bin".to_string(),
            dst: "bin".to_string(),
        },
        ImportRule {
            pattern: "*.dylib".to_string(),
            src: "lib".to_string(),
            dst: "lib".to_string(),
        },
        ImportRule {
            pattern: "*.json".to_string(),
            src: "bin".to_string(),
            dst: "bin".to_string(),
        },
    ]
}

/// Build options for one declared dependency. Only the `shared` toggle is
/// ever touched by this recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyOptions {
    pub shared: Option<bool>,
}

/// Per-dependency option table handed to the resolving engine.
pub type OptionTable = BTreeMap<String, DependencyOptions>;

impl RecipeConfig {
    /// Load the recipe config from a file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recipe config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse recipe config: {}", path.display()))
    }

    /// Load the recipe config from the project directory, falling back to
    /// the stock declarations when no `gantry.toml` exists. A present but
    /// broken config is a hard error, not a silent fallback.
    pub fn load_or_default(project_dir: &Path) -> Result<Self, RecipeError> {
        let path = project_dir.join(RECIPE_FILE_NAME);
        if !path.exists() {
            tracing::debug!("no {} found, using stock declarations", RECIPE_FILE_NAME);
            return Ok(Self::default());
        }

        Self::load(&path).map_err(|e| RecipeError::Configuration {
            reason: format!("{:#}", e),
        })
    }

    /// Build the per-dependency option table and force the `shared` option
    /// for the configured dependency. No other options are touched.
    pub fn configure(&self) -> Result<OptionTable, RecipeError> {
        let mut table = OptionTable::new();
        for reference in &self.requires {
            let require = RequireRef::parse(reference)?;
            table.insert(require.name, DependencyOptions::default());
        }

        match table.get_mut(&self.options.force_shared) {
            Some(options) => options.shared = Some(true),
            None => {
                return Err(RecipeError::Configuration {
                    reason: format!(
                        "dependency `{}` is not declared; cannot force its shared option",
                        self.options.force_shared
                    ),
                });
            }
        }

        Ok(table)
    }
}

/// A declared dependency reference of the form `name/version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireRef {
    pub name: String,
    pub version: String,
}

impl RequireRef {
    /// Parse and validate a `name/version` reference. Names follow the
    /// engine's reference grammar; versions are opaque non-empty strings.
    pub fn parse(reference: &str) -> Result<Self, RecipeError> {
        let (name, version) =
            reference
                .split_once('/')
                .ok_or_else(|| RecipeError::Configuration {
                    reason: format!(
                        "invalid dependency reference `{}`: expected `name/version`",
                        reference
                    ),
                })?;

        let name_pattern = Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_+.-]{1,50}$").unwrap();
        if !name_pattern.is_match(name) {
            return Err(RecipeError::Configuration {
                reason: format!("invalid package name `{}` in reference `{}`", name, reference),
            });
        }

        if version.is_empty() {
            return Err(RecipeError::Configuration {
                reason: format!("empty version in reference `{}`", reference),
            });
        }

        Ok(RequireRef {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}
