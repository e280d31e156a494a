//! Package identity from the descriptor file.
//!
//! The descriptor is a single-line text file of the form `<name>:<version>`,
//! kept next to the recipe config. It is read once at the start of an
//! evaluation pass; the parsed identity is immutable afterward and threaded
//! explicitly into the later operations.

use std::path::Path;

use crate::core::error::RecipeError;

/// Fixed name of the descriptor file, resolved against the project directory.
pub const DESCRIPTOR_FILE_NAME: &str = "name-version.txt";

/// Package identity parsed from the descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
}

impl PackageDescriptor {
    /// Parse descriptor contents: split on the first colon, trim both parts.
    ///
    /// The only format requirement is the colon separator. Surrounding
    /// whitespace is tolerated on both segments.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, RecipeError> {
        let (name, version) =
            contents
                .split_once(':')
                .ok_or_else(|| RecipeError::DescriptorFormat {
                    path: path.to_path_buf(),
                })?;

        Ok(PackageDescriptor {
            name: name.trim().to_string(),
            version: version.trim().to_string(),
        })
    }

    /// Load the descriptor file from the project directory.
    pub fn load(project_dir: &Path) -> Result<Self, RecipeError> {
        let path = project_dir.join(DESCRIPTOR_FILE_NAME);
        let contents =
            std::fs::read_to_string(&path).map_err(|source| RecipeError::DescriptorRead {
                path: path.clone(),
                source,
            })?;

        Self::parse(&contents, &path)
    }

    /// `name/version` reference form, used for identity hashing and display.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}
