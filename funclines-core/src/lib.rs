//! funclines core library - heuristic function detection and body line counting
//! for brace-delimited languages

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every scan is a pure function of (text, options)
// - No global mutable state; configuration is always passed explicitly
// - Nothing in the scan path fails: undetectable functions yield no report
// - Reports are ordered by source position
// - Identical input yields byte-for-byte identical output

pub mod analysis;
pub mod body;
pub mod cancel;
pub mod color;
pub mod config;
pub mod discover;
pub mod lexer;
pub mod lines;
pub mod report;
pub mod scan;
pub mod signature;

pub use cancel::{ScanGeneration, ScanTicket};
pub use config::ResolvedConfig;
pub use report::{
    annotate, render_annotations, render_json, render_text, sort_entries, FunctionEntry,
    FunctionReport, Severity, SortOrder,
};
pub use scan::{scan, scan_until, scan_with_max_lines, ScanOptions, DEFAULT_MAX_LINES};

use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub min_lines: Option<usize>,
    pub top_n: Option<usize>,
    pub warnings_only: bool,
    pub sort: SortOrder,
}

/// Analyze files at the given path with default configuration
pub fn analyze(path: &Path, options: AnalysisOptions) -> Result<Vec<FunctionEntry>> {
    let config = ResolvedConfig::defaults()?;
    analyze_with_config(path, options, &config)
}

/// Analyze files at the given path with a resolved configuration
pub fn analyze_with_config(
    path: &Path,
    options: AnalysisOptions,
    config: &ResolvedConfig,
) -> Result<Vec<FunctionEntry>> {
    let files = discover::collect_source_files(path, config)?;
    let (entries, skipped) = analysis::analyze_files(&files, &config.scan);
    if skipped > 0 {
        tracing::warn!("skipped {} file(s) due to read errors", skipped);
    }
    Ok(finish_entries(entries, &options))
}

/// Filter, sort, and truncate entries for output
pub fn finish_entries(entries: Vec<FunctionEntry>, options: &AnalysisOptions) -> Vec<FunctionEntry> {
    let filtered: Vec<FunctionEntry> = entries
        .into_iter()
        .filter(|e| !options.warnings_only || e.report.is_warning())
        .filter(|e| options.min_lines.map_or(true, |min| e.report.line_count >= min))
        .collect();

    let sorted = sort_entries(filtered, options.sort);

    if let Some(top_n) = options.top_n {
        sorted.into_iter().take(top_n).collect()
    } else {
        sorted
    }
}
