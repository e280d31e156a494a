//! Gantry - emits CMake package metadata from a resolved dependency graph.
//!
//! This crate sits between an external dependency-resolution engine and a
//! CMake build: it derives the package identity from a descriptor file,
//! adjusts dependency options ahead of resolution, renders the resolved
//! graph into `conan-packages.cmake`, and stages runtime artifacts into
//! local `bin`/`lib` directories. Resolution itself is the engine's job;
//! this crate only consumes its output.

pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::{
    descriptor::PackageDescriptor, error::RecipeError, graph::DependencyGraph,
    graph::DependencyRecord, recipe::RecipeConfig,
};
