//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Severity of a function's body length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Neutral,
    Warning,
}

impl Severity {
    /// Warning strictly above `max_lines`; a body of exactly `max_lines` is neutral
    pub fn classify(line_count: usize, max_lines: usize) -> Self {
        if line_count > max_lines {
            Severity::Warning
        } else {
            Severity::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Neutral => "neutral",
            Severity::Warning => "warning",
        }
    }
}

/// One recognized function body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub name: String,
    /// 1-based line of the signature's identifier
    pub signature_line: u32,
    /// 1-based line of the closing brace
    pub close_line: u32,
    /// 1-based line just below the closing brace, where the annotation goes
    pub anchor_line: u32,
    /// Newlines strictly inside the body
    pub line_count: usize,
    pub severity: Severity,
}

impl FunctionReport {
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Annotation text shown next to the function
    pub fn label(&self) -> String {
        match self.severity {
            Severity::Warning => format!("⚠⚠ FUNCTION LINES : {} ⚠⚠", self.line_count),
            Severity::Neutral => format!("—— FUNCTION LINES : {} ——", self.line_count),
        }
    }
}

/// A function report located in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub file: String,
    #[serde(flatten)]
    pub report: FunctionReport,
}

/// Ordering applied to entries before rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// File path ascending, then source position
    #[default]
    Source,
    /// Line count descending, then file and position
    Lines,
}

/// Colors a renderer assigns per severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub neutral: Color,
    pub warning: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            neutral: Color::neutral_default(),
            warning: Color::warning_default(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, severity: Severity) -> &Color {
        match severity {
            Severity::Neutral => &self.neutral,
            Severity::Warning => &self.warning,
        }
    }
}

/// `(line, label)` pair consumed by an editor or terminal renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub file: String,
    pub line: u32,
    pub label: String,
    pub color: Color,
    pub severity: Severity,
}

/// Sort entries deterministically
pub fn sort_entries(mut entries: Vec<FunctionEntry>, order: SortOrder) -> Vec<FunctionEntry> {
    let by_position = |a: &FunctionEntry, b: &FunctionEntry| {
        a.file
            .cmp(&b.file)
            .then_with(|| a.report.signature_line.cmp(&b.report.signature_line))
            .then_with(|| a.report.close_line.cmp(&b.report.close_line))
    };
    match order {
        SortOrder::Source => entries.sort_by(by_position),
        SortOrder::Lines => entries.sort_by(|a, b| {
            b.report
                .line_count
                .cmp(&a.report.line_count)
                .then_with(|| by_position(a, b))
        }),
    }
    entries
}

/// Build renderer annotations for entries
pub fn annotate(entries: &[FunctionEntry], palette: &Palette) -> Vec<Annotation> {
    entries
        .iter()
        .map(|entry| Annotation {
            file: entry.file.clone(),
            line: entry.report.anchor_line,
            label: entry.report.label(),
            color: palette.color_for(entry.report.severity).clone(),
            severity: entry.report.severity,
        })
        .collect()
}

/// Render entries as a text table
pub fn render_text(entries: &[FunctionEntry]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<8} {:<30} {:<6} {}\n",
        "LINES", "SEVERITY", "FILE", "LINE", "FUNCTION"
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<6} {:<8} {:<30} {:<6} {}\n",
            entry.report.line_count,
            entry.report.severity.as_str(),
            truncate_or_pad(&entry.file, 30),
            entry.report.signature_line,
            entry.report.name,
        ));
    }

    let warnings = entries.iter().filter(|e| e.report.is_warning()).count();
    output.push_str(&format!(
        "\n{} function(s), {} over the limit\n",
        entries.len(),
        warnings
    ));

    output
}

/// Render entries as JSON output
pub fn render_json(entries: &[FunctionEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}

/// Render annotations one per line as `file:line: label`
pub fn render_annotations(annotations: &[Annotation]) -> String {
    annotations
        .iter()
        .map(|a| format!("{}:{}: {}\n", a.file, a.line, a.label))
        .collect()
}

/// Truncate (keeping the tail) or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    let chars = s.chars().count();
    if chars > width {
        let tail: String = s.chars().skip(chars - width.saturating_sub(3)).collect();
        format!("...{}", tail)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
