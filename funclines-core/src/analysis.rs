//! Analysis orchestration - ties together file reading, scanning, and reporting

use crate::report::FunctionEntry;
use crate::scan::{self, ScanOptions};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Scan an in-memory buffer, labelling entries with `file`
pub fn analyze_source(file: &str, src: &str, options: &ScanOptions) -> Vec<FunctionEntry> {
    scan::scan(src, options)
        .into_iter()
        .map(|report| FunctionEntry {
            file: file.to_string(),
            report,
        })
        .collect()
}

/// Read and scan one file
pub fn analyze_file(path: &Path, options: &ScanOptions) -> Result<Vec<FunctionEntry>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let file = display_path(path);
    let entries = analyze_source(&file, &src, options);
    tracing::debug!(file = %file, functions = entries.len(), "scanned file");
    Ok(entries)
}

/// Scan files in parallel, keeping input order
///
/// Files that cannot be read are logged and skipped; the second element of
/// the result is how many were skipped.
pub fn analyze_files(files: &[PathBuf], options: &ScanOptions) -> (Vec<FunctionEntry>, usize) {
    let results: Vec<Result<Vec<FunctionEntry>>> = files
        .par_iter()
        .map(|path| analyze_file(path, options))
        .collect();
    merge_results(files, results)
}

/// Flatten per-file results in file order, logging and counting failures
pub fn merge_results(
    files: &[PathBuf],
    results: Vec<Result<Vec<FunctionEntry>>>,
) -> (Vec<FunctionEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(found) => entries.extend(found),
            Err(e) => {
                tracing::warn!(file = %path.display(), "skipping file: {:#}", e);
                skipped += 1;
            }
        }
    }
    (entries, skipped)
}

/// Path as shown in reports, with forward slashes
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
