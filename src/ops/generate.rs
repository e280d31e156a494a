//! The manifest generation pass.
//!
//! One linear evaluation: resolve the package identity, adjust dependency
//! options, load the engine-resolved graph, render and write the manifest.
//! The first failure aborts the pass; there is no partial output beyond the
//! unreferenced staging file of the atomic write.

use std::path::PathBuf;

use crate::core::descriptor::PackageDescriptor;
use crate::core::error::{logged, RecipeError};
use crate::core::graph::DependencyGraph;
use crate::core::manifest::{render_manifest, MANIFEST_FILE_NAME};
use crate::core::recipe::RecipeConfig;
use crate::util::fs::write_atomic;

/// Options for the generation pass.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding the descriptor and recipe config
    pub project_dir: PathBuf,

    /// Override for the engine graph file location
    pub graph_path: Option<PathBuf>,

    /// Override for the manifest output location
    pub output_path: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            project_dir: PathBuf::from("."),
            graph_path: None,
            output_path: None,
        }
    }
}

impl GenerateOptions {
    /// Create new generate options for a project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            project_dir: project_dir.into(),
            ..Default::default()
        }
    }

    /// Set the engine graph file location.
    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = Some(path.into());
        self
    }

    /// Set the manifest output location.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Result of a generation pass.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The identity the manifest was generated for
    pub descriptor: PackageDescriptor,

    /// Where the manifest was written
    pub manifest_path: PathBuf,

    /// Number of resolved dependencies rendered
    pub dependency_count: usize,
}

/// Run one generation pass.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateResult, RecipeError> {
    let descriptor = logged("resolve identity", || {
        PackageDescriptor::load(&opts.project_dir)
    })?;
    tracing::debug!("package identity: {}", descriptor.reference());

    let config = logged("load recipe config", || {
        RecipeConfig::load_or_default(&opts.project_dir)
    })?;

    let option_table = logged("configure dependencies", || config.configure())?;
    for (name, options) in &option_table {
        tracing::debug!("dependency {} options: {:?}", name, options);
    }

    let graph_path = opts
        .graph_path
        .clone()
        .unwrap_or_else(|| opts.project_dir.join(&config.engine.graph));
    let graph = logged("load dependency graph", || {
        DependencyGraph::load(&graph_path, &config.engine.required)
    })?;
    tracing::debug!(
        "resolved {} dependencies from {}",
        graph.dependencies.len(),
        graph_path.display()
    );

    let manifest_path = opts
        .output_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE_NAME));
    let content = render_manifest(&graph, &config.engine.generator);
    logged("write manifest", || {
        write_atomic(&manifest_path, &content).map_err(|source| RecipeError::Write {
            path: manifest_path.clone(),
            source,
        })
    })?;

    tracing::info!("Generated {}", manifest_path.display());

    Ok(GenerateResult {
        descriptor,
        manifest_path,
        dependency_count: graph.dependencies.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::DESCRIPTOR_FILE_NAME;
    use crate::core::recipe::RECIPE_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    const GRAPH: &str = r#"{
        "engine_version": "1.49.0",
        "dependencies": [
            {
                "name": "vulkan",
                "version": "1.3.216.0",
                "rootpath": "C:\\conan\\data\\vulkan",
                "names": {"cmake_find_package": "Vulkan"}
            },
            {
                "name": "glfw",
                "version": "3.3.7",
                "rootpath": "/opt/conan/glfw"
            }
        ]
    }"#;

    fn project(tmp: &TempDir) -> GenerateOptions {
        fs::write(tmp.path().join(DESCRIPTOR_FILE_NAME), "mylib: 2.3.1\n").unwrap();
        fs::write(tmp.path().join("conanbuildinfo.json"), GRAPH).unwrap();

        GenerateOptions::new(tmp.path()).with_output_path(tmp.path().join("conan-packages.cmake"))
    }

    #[test]
    fn test_generate_writes_manifest() {
        let tmp = TempDir::new().unwrap();
        let opts = project(&tmp);

        let result = generate(&opts).unwrap();
        assert_eq!(result.descriptor.name, "mylib");
        assert_eq!(result.descriptor.version, "2.3.1");
        assert_eq!(result.dependency_count, 2);

        let content = fs::read_to_string(&result.manifest_path).unwrap();
        assert!(content.contains("set(\"${PROJECT_NAME}_CONAN_PACKAGE_NAMES\"\n"));
        assert!(content.contains("    \"glfw3\"\n"));
        assert!(content.contains("    \"C:/conan/data/vulkan\" # vulkan\n"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let opts = project(&tmp);

        generate(&opts).unwrap();
        let first = fs::read(tmp.path().join("conan-packages.cmake")).unwrap();
        generate(&opts).unwrap();
        let second = fs::read(tmp.path().join("conan-packages.cmake")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_missing_descriptor_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("conanbuildinfo.json"), GRAPH).unwrap();
        let opts = GenerateOptions::new(tmp.path())
            .with_output_path(tmp.path().join("conan-packages.cmake"));

        assert!(matches!(
            generate(&opts),
            Err(RecipeError::DescriptorRead { .. })
        ));
        assert!(!tmp.path().join("conan-packages.cmake").exists());
    }

    #[test]
    fn test_generate_respects_graph_override() {
        let tmp = TempDir::new().unwrap();
        let opts = project(&tmp);

        let other = tmp.path().join("elsewhere.json");
        fs::rename(tmp.path().join("conanbuildinfo.json"), &other).unwrap();

        assert!(matches!(
            generate(&opts),
            Err(RecipeError::GraphRead { .. })
        ));

        let result = generate(&opts.clone().with_graph_path(&other)).unwrap();
        assert_eq!(result.dependency_count, 2);
    }

    #[test]
    fn test_generate_fails_on_undeclared_forced_dependency() {
        let tmp = TempDir::new().unwrap();
        let opts = project(&tmp);
        fs::write(
            tmp.path().join(RECIPE_FILE_NAME),
            "[options]\nforce-shared = \"opengl\"\n",
        )
        .unwrap();

        assert!(matches!(
            generate(&opts),
            Err(RecipeError::Configuration { .. })
        ));
        assert!(!tmp.path().join("conan-packages.cmake").exists());
    }

    #[test]
    fn test_generate_write_failure_kind() {
        let tmp = TempDir::new().unwrap();
        let opts = project(&tmp);
        let opts = opts.with_output_path(tmp.path().join("no-such-dir").join("out.cmake"));

        assert!(matches!(generate(&opts), Err(RecipeError::Write { .. })));
    }
}
