//! Scan pipeline: signatures → bodies → reports
//!
//! Global invariants enforced:
//! - Pure function of (text, options): no I/O, no shared state
//! - Reports are ordered by ascending signature offset
//! - Nothing in a scan can fail; undetected bodies simply yield no report

use crate::body::{self, BraceMatch, BracePlacement};
use crate::cancel::{Interrupt, Uninterrupted};
use crate::lines::LineIndex;
use crate::report::{FunctionReport, Severity};
use crate::signature::{SignatureMode, SignatureScanner};
use serde::{Deserialize, Serialize};

/// Default body length above which a function is flagged
pub const DEFAULT_MAX_LINES: usize = 25;

/// Per-scan parameters, passed explicitly on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub max_lines: usize,
    pub brace_placement: BracePlacement,
    pub signature_mode: SignatureMode,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_lines: DEFAULT_MAX_LINES,
            brace_placement: BracePlacement::default(),
            signature_mode: SignatureMode::default(),
        }
    }
}

impl ScanOptions {
    pub fn with_max_lines(max_lines: usize) -> Self {
        ScanOptions {
            max_lines,
            ..Self::default()
        }
    }
}

/// Scan `text` for function bodies
pub fn scan(text: &str, options: &ScanOptions) -> Vec<FunctionReport> {
    scan_until(text, options, &Uninterrupted).unwrap_or_default()
}

/// Scan with default options and a custom threshold
pub fn scan_with_max_lines(text: &str, max_lines: usize) -> Vec<FunctionReport> {
    scan(text, &ScanOptions::with_max_lines(max_lines))
}

/// Scan `text`, stopping early if `interrupt` fires
///
/// Returns `None` when interrupted; partial results are discarded.
pub fn scan_until<I: Interrupt + ?Sized>(
    text: &str,
    options: &ScanOptions,
    interrupt: &I,
) -> Option<Vec<FunctionReport>> {
    let bytes = text.as_bytes();
    let index = LineIndex::new(text);
    let mut reports = Vec::new();
    let mut candidates = 0usize;
    let mut unbalanced = 0usize;

    for signature in SignatureScanner::with_mode(text, options.signature_mode) {
        if interrupt.is_interrupted() {
            return None;
        }
        candidates += 1;

        let Some(open) = body::locate_open_brace(bytes, signature.end, options.brace_placement)
        else {
            continue;
        };

        let close = match body::match_brace(bytes, open, interrupt) {
            BraceMatch::Closed(close) => close,
            BraceMatch::Unbalanced => {
                unbalanced += 1;
                continue;
            }
            BraceMatch::Interrupted => return None,
        };

        let line_count = body::count_body_lines(bytes, open, close);
        let close_line = index.line_of(close);
        reports.push(FunctionReport {
            name: signature.name().to_string(),
            signature_line: index.line_of(signature.start),
            close_line,
            anchor_line: close_line + 1,
            line_count,
            severity: Severity::classify(line_count, options.max_lines),
        });
    }

    tracing::trace!(
        candidates,
        functions = reports.len(),
        unbalanced,
        "scan complete"
    );
    Some(reports)
}
