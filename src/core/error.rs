//! Recipe failure kinds and the uniform failure policy.
//!
//! Every operation boundary follows one policy: on failure, log the full
//! failure chain, then re-signal the same error to the caller unchanged.
//! There is no differentiated recovery. Every kind is fatal to the current
//! evaluation pass; the only observable difference between kinds is the
//! message.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while evaluating the recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The descriptor file is missing or unreadable.
    #[error("failed to read descriptor {}", .path.display())]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The descriptor file has no `name:version` separator.
    #[error("descriptor {} has no `name:version` separator", .path.display())]
    DescriptorFormat { path: PathBuf },

    /// The declared dependency set does not support the requested adjustment.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// The resolver's graph file is missing or unreadable.
    #[error("failed to read dependency graph {}", .path.display())]
    GraphRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resolver's graph file does not match the expected schema.
    #[error("invalid dependency graph {}", .path.display())]
    GraphFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The resolving engine does not satisfy the recipe's version gate.
    #[error("engine version {found} does not satisfy required {required}")]
    EngineVersion { found: String, required: String },

    /// An output file could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run one operation under the uniform failure policy: on error, log the
/// full failure chain at error level, then re-signal the error unchanged.
pub fn logged<T>(op: &str, f: impl FnOnce() -> Result<T, RecipeError>) -> Result<T, RecipeError> {
    f().map_err(|e| {
        tracing::error!("{} failed: {}", op, render_chain(&e));
        e
    })
}

/// Render an error and every `source()` link as a single line.
fn render_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_passes_through_ok() {
        let result = logged("noop", || Ok::<_, RecipeError>(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_logged_returns_error_unchanged() {
        let result: Result<(), _> = logged("probe", || {
            Err(RecipeError::Configuration {
                reason: "boom".to_string(),
            })
        });

        match result {
            Err(RecipeError::Configuration { reason }) => assert_eq!(reason, "boom"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_render_chain_includes_source() {
        let err = RecipeError::DescriptorRead {
            path: PathBuf::from("name-version.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        let chain = render_chain(&err);
        assert!(chain.contains("failed to read descriptor"));
        assert!(chain.contains("no such file"));
    }

    #[test]
    fn test_error_messages_name_the_kind() {
        let err = RecipeError::EngineVersion {
            found: "1.40.0".to_string(),
            required: ">=1.43.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "engine version 1.40.0 does not satisfy required >=1.43.0"
        );
    }
}
