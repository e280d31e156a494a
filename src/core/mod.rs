//! Core data structures for Gantry.
//!
//! This module contains the foundational types of the recipe:
//! - Package identity from the descriptor file
//! - Recipe configuration and dependency options
//! - The engine-resolved dependency graph
//! - Manifest rendering
//! - Failure kinds and the uniform failure policy

pub mod descriptor;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod recipe;

pub use descriptor::{PackageDescriptor, DESCRIPTOR_FILE_NAME};
pub use error::{logged, RecipeError};
pub use graph::{DependencyGraph, DependencyRecord};
pub use manifest::{cmake_alias, render_manifest, MANIFEST_FILE_NAME};
pub use recipe::{ImportRule, OptionTable, RecipeConfig, RequireRef, RECIPE_FILE_NAME};
