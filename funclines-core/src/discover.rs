//! Source file discovery
//!
//! Global invariants enforced:
//! - Deterministic, sorted file order
//! - Symlinks are never followed
//! - Include/exclude globs match paths relative to the scanned root

use crate::config::ResolvedConfig;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extensions of brace-delimited languages scanned by default
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "m", "mm", "cs", "java", "kt", "kts",
    "scala", "groovy", "go", "rs", "swift", "dart", "js", "mjs", "cjs", "jsx", "ts", "mts",
    "cts", "tsx", "php",
];

/// Returns true for directory names that should not be traversed
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.')
        || name == "node_modules"
        || name == "target"
        || name == "dist"
        || name == "build"
        || name == "out"
        || name == "vendor"
}

/// Collect all source files to scan under `path` (file or directory)
///
/// An explicitly named file is always returned, whatever its extension.
pub fn collect_source_files(path: &Path, config: &ResolvedConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        collect_recursive(path, path, config, &mut files)?;
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Recursively collect supported source files from a directory
fn collect_recursive(
    root: &Path,
    dir: &Path,
    config: &ResolvedConfig,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

        if metadata.is_symlink() {
            continue;
        }

        if metadata.is_dir() {
            if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
                if is_skipped_dir(name) {
                    continue;
                }
            }
            collect_recursive(root, &path, config, files)?;
        } else if metadata.is_file() && config.has_supported_extension(&path) {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if config.should_include(relative) {
                files.push(path);
            }
        }
    }

    Ok(())
}
