//! Runtime artifact staging.
//!
//! Copies dynamic libraries and auxiliary JSON files out of the resolved
//! packages' root folders into the consuming project's local `bin`/`lib`
//! staging directories. A pure file-copy side effect; nothing is
//! transformed.

use std::path::PathBuf;

use crate::core::error::{logged, RecipeError};
use crate::core::graph::DependencyGraph;
use crate::core::recipe::RecipeConfig;
use crate::util::fs::glob_files;

/// Options for the artifact staging pass.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Directory holding the recipe config
    pub project_dir: PathBuf,

    /// Override for the engine graph file location
    pub graph_path: Option<PathBuf>,

    /// Directory receiving the staging folders
    pub dest_dir: PathBuf,

    /// Log the would-be copies without touching the filesystem
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            project_dir: PathBuf::from("."),
            graph_path: None,
            dest_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl ImportOptions {
    /// Create new import options for a project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        ImportOptions {
            project_dir: project_dir.into(),
            ..Default::default()
        }
    }

    /// Set the engine graph file location.
    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = Some(path.into());
        self
    }

    /// Set the staging destination directory.
    pub fn with_dest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = dir.into();
        self
    }

    /// Set dry run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One staged file.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    /// Source path inside the resolved package
    pub source: PathBuf,

    /// Destination path inside the staging directory
    pub destination: PathBuf,
}

/// Result of the staging pass.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Files staged (or, in dry-run mode, files that would have been)
    pub copied: Vec<ImportedFile>,
}

/// Copy runtime artifacts from every resolved package into the local
/// staging directories.
pub fn import_runtime_artifacts(opts: &ImportOptions) -> Result<ImportResult, RecipeError> {
    let config = logged("load recipe config", || {
        RecipeConfig::load_or_default(&opts.project_dir)
    })?;

    let graph_path = opts
        .graph_path
        .clone()
        .unwrap_or_else(|| opts.project_dir.join(&config.engine.graph));
    let graph = logged("load dependency graph", || {
        DependencyGraph::load(&graph_path, &config.engine.required)
    })?;

    let result = logged("collect runtime artifacts", || {
        copy_artifacts(&config, &graph, opts)
    })?;

    if opts.dry_run {
        tracing::info!("[dry-run] Would import {} files", result.copied.len());
    } else {
        tracing::info!("Imported {} files", result.copied.len());
    }

    Ok(result)
}

fn copy_artifacts(
    config: &RecipeConfig,
    graph: &DependencyGraph,
    opts: &ImportOptions,
) -> Result<ImportResult, RecipeError> {
    let mut result = ImportResult::default();

    for record in graph.records() {
        let rootpath = PathBuf::from(&record.rootpath);

        for rule in &config.imports {
            let src_root = rootpath.join(&rule.src);
            if !src_root.is_dir() {
                // Packages without this artifact tree simply contribute nothing.
                continue;
            }

            let patterns = vec![rule.pattern.clone(), format!("**/{}", rule.pattern)];
            let matches =
                glob_files(&src_root, &patterns).map_err(|e| RecipeError::Configuration {
                    reason: format!("{:#}", e),
                })?;

            for source in matches {
                let relative = source.strip_prefix(&src_root).unwrap_or(&source).to_path_buf();
                let destination = opts.dest_dir.join(&rule.dst).join(&relative);

                if opts.dry_run {
                    tracing::info!(
                        "[dry-run] Would copy {} -> {}",
                        source.display(),
                        destination.display()
                    );
                    result.copied.push(ImportedFile {
                        source,
                        destination,
                    });
                    continue;
                }

                if let Some(parent) = destination.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| RecipeError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }

                std::fs::copy(&source, &destination).map_err(|io| RecipeError::Write {
                    path: destination.clone(),
                    source: io,
                })?;
                tracing::debug!("Copied {} -> {}", source.display(), destination.display());

                result.copied.push(ImportedFile {
                    source,
                    destination,
                });
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::DESCRIPTOR_FILE_NAME;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake_package(root: &Path, layout: &[(&str, &str)]) {
        for (dir, file) in layout {
            let dir = root.join(dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(file), "artifact").unwrap();
        }
    }

    fn project(tmp: &TempDir) -> (ImportOptions, PathBuf) {
        let vulkan_root = tmp.path().join("pkgs").join("vulkan");
        let glfw_root = tmp.path().join("pkgs").join("glfw");
        fake_package(
            &vulkan_root,
            &[
                ("bin", "vulkan-1.dll"),
                ("bin", "icd.json"),
                ("bin/layers", "validation.dll"),
                ("lib", "libvulkan.dylib"),
                ("bin", "readme.txt"),
            ],
        );
        fake_package(&glfw_root, &[("lib", "libglfw.dylib")]);

        let graph = serde_json::json!({
            "engine_version": "1.49.0",
            "dependencies": [
                {"name": "vulkan", "version": "1.3.216.0", "rootpath": vulkan_root},
                {"name": "glfw", "version": "3.3.7", "rootpath": glfw_root}
            ]
        });

        let project_dir = tmp.path().join("project");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(project_dir.join(DESCRIPTOR_FILE_NAME), "mylib:2.3.1").unwrap();
        fs::write(
            project_dir.join("conanbuildinfo.json"),
            serde_json::to_string_pretty(&graph).unwrap(),
        )
        .unwrap();

        let dest = tmp.path().join("staging");
        fs::create_dir_all(&dest).unwrap();

        (
            ImportOptions::new(&project_dir).with_dest_dir(&dest),
            dest,
        )
    }

    #[test]
    fn test_imports_copies_by_rule() {
        let tmp = TempDir::new().unwrap();
        let (opts, dest) = project(&tmp);

        let result = import_runtime_artifacts(&opts).unwrap();
        assert_eq!(result.copied.len(), 5);

        assert!(dest.join("bin").join("vulkan-1.dll").exists());
        assert!(dest.join("bin").join("icd.json").exists());
        assert!(dest.join("lib").join("libvulkan.dylib").exists());
        assert!(dest.join("lib").join("libglfw.dylib").exists());
        // Subdirectories below the rule's src are preserved.
        assert!(dest.join("bin").join("layers").join("validation.dll").exists());
        // Files outside the patterns stay behind.
        assert!(!dest.join("bin").join("readme.txt").exists());
    }

    #[test]
    fn test_imports_dry_run_copies_nothing() {
        let tmp = TempDir::new().unwrap();
        let (opts, dest) = project(&tmp);

        let result = import_runtime_artifacts(&opts.with_dry_run(true)).unwrap();
        assert_eq!(result.copied.len(), 5);
        assert!(!dest.join("bin").exists());
        assert!(!dest.join("lib").exists());
    }

    #[test]
    fn test_imports_missing_artifact_trees_contribute_nothing() {
        let tmp = TempDir::new().unwrap();

        let bare_root = tmp.path().join("pkgs").join("bare");
        fs::create_dir_all(&bare_root).unwrap();
        let graph = serde_json::json!({
            "engine_version": "1.49.0",
            "dependencies": [
                {"name": "vulkan", "version": "1.3.216.0", "rootpath": bare_root},
                {"name": "glfw", "version": "3.3.7", "rootpath": tmp.path().join("absent")}
            ]
        });

        let project_dir = tmp.path().join("project");
        fs::create_dir_all(&project_dir).unwrap();
        fs::write(
            project_dir.join("conanbuildinfo.json"),
            graph.to_string(),
        )
        .unwrap();

        let result = import_runtime_artifacts(
            &ImportOptions::new(&project_dir).with_dest_dir(tmp.path().join("staging")),
        )
        .unwrap();
        assert!(result.copied.is_empty());
    }
}
