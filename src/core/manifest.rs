//! Rendering of the generated build-system include file.
//!
//! The manifest is four `set(...)` list assignments — package names,
//! build-system package names, versions, root paths — consumed by CMake via
//! `include()`. The `${PROJECT_NAME}` placeholder is substituted by the
//! including project's own tooling, not here.

use crate::core::graph::DependencyGraph;

/// Fixed name of the generated include file.
pub const MANIFEST_FILE_NAME: &str = "conan-packages.cmake";

/// The one hardcoded presentation alias: `glfw` publishes its build-system
/// package as `glfw3`.
pub fn cmake_alias(name: &str) -> &str {
    if name == "glfw" {
        "glfw3"
    } else {
        name
    }
}

/// Normalize path separators to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Render the four-block manifest for a resolved graph.
///
/// Block order is fixed (names, build-system names, versions, paths) and
/// per-block line order is the graph's resolver order, so re-rendering an
/// unchanged graph yields byte-identical output.
pub fn render_manifest(graph: &DependencyGraph, generator: &str) -> String {
    let mut out = String::new();

    out.push_str("set(\"${PROJECT_NAME}_CONAN_PACKAGE_NAMES\"\n");
    for name in graph.names() {
        push_entry(&mut out, cmake_alias(name), None);
    }
    out.push_str(")\n");

    out.push_str("set(\"${PROJECT_NAME}_CMAKE_PACKAGE_NAMES\"\n");
    for record in graph.records() {
        let build_name = cmake_alias(record.build_system_name(generator));
        push_entry(&mut out, build_name, Some(cmake_alias(&record.name)));
    }
    out.push_str(")\n");

    // Versions and paths carry the raw declared name in their comments; only
    // the two name blocks use the alias.
    out.push_str("set(\"${PROJECT_NAME}_CMAKE_PACKAGE_VERSIONS\"\n");
    for record in graph.records() {
        push_entry(&mut out, &record.version, Some(&record.name));
    }
    out.push_str(")\n");

    out.push_str("set(\"${PROJECT_NAME}_CMAKE_PACKAGE_PATHS\"\n");
    for record in graph.records() {
        push_entry(
            &mut out,
            &normalize_separators(&record.rootpath),
            Some(&record.name),
        );
    }
    out.push_str(")\n");

    out
}

/// One quoted list entry, optionally followed by a ` # name` comment.
fn push_entry(out: &mut String, value: &str, comment: Option<&str>) {
    out.push_str("    \"");
    out.push_str(value);
    out.push('"');
    if let Some(comment) = comment {
        out.push_str(" # ");
        out.push_str(comment);
    }
    out.push('\n');
}
