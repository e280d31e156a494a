//! Filesystem utilities.

use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        // Make pattern absolute by joining with base
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Write a file atomically: stage the contents into a temp file in the
/// destination directory, then rename over the target. Overwrites any
/// previous file in full. A missing destination directory is an error, not
/// something to create.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        fs::create_dir_all(bin.join("sub")).unwrap();
        fs::write(bin.join("a.dll"), "a").unwrap();
        fs::write(bin.join("sub").join("b.dll"), "b").unwrap();
        fs::write(bin.join("readme.txt"), "readme").unwrap();

        let files = glob_files(
            tmp.path(),
            &["bin/*.dll".to_string(), "bin/**/*.dll".to_string()],
        )
        .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "dll"));
    }

    #[test]
    fn test_glob_files_dedups_overlapping_patterns() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("data.json"), "{}").unwrap();

        let files = glob_files(
            tmp.path(),
            &["*.json".to_string(), "**/*.json".to_string()],
        )
        .unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.cmake");

        write_atomic(&path, "content\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content\n");
    }

    #[test]
    fn test_write_atomic_overwrites_in_full() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.cmake");

        write_atomic(&path, "first pass, longer contents\n").unwrap();
        write_atomic(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn test_write_atomic_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent").join("out.cmake");

        assert!(write_atomic(&path, "content").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.cmake");
        write_atomic(&path, "content\n").unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
