//! Annotation colors
//!
//! Colors come from user configuration and are validated as plain strings.
//! An invalid value never fails a scan: it falls back to the default for its
//! role and the fallback is logged.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Named colors accepted in configuration
pub const NAMED_COLORS: &[&str] = &[
    "black", "blue", "brown", "cyan", "gray", "green", "grey", "magenta", "orange", "pink",
    "purple", "red", "white", "yellow",
];

pub const DEFAULT_NEUTRAL: &str = "gray";
pub const DEFAULT_WARNING: &str = "red";

fn hex_pattern() -> &'static Regex {
    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    HEX_RE.get_or_init(|| {
        Regex::new(r"^#?(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("hex color pattern compiles")
    })
}

/// A validated color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Named(&'static str),
    /// Hex digits without the leading `#`, lowercased
    Hex(String),
}

impl Color {
    /// Parse a configured color; `None` if it is neither hex nor a known name
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if hex_pattern().is_match(value) {
            return Some(Color::Hex(value.trim_start_matches('#').to_ascii_lowercase()));
        }
        let lower = value.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|name| **name == lower)
            .map(|name| Color::Named(*name))
    }

    /// Parse a configured color, substituting `default` when invalid
    pub fn parse_or(value: Option<&str>, default: &'static str) -> Color {
        match value {
            None => Color::Named(default),
            Some(raw) => Color::parse(raw).unwrap_or_else(|| {
                tracing::warn!(color = raw, fallback = default, "invalid color, using default");
                Color::Named(default)
            }),
        }
    }

    pub fn neutral_default() -> Color {
        Color::Named(DEFAULT_NEUTRAL)
    }

    pub fn warning_default() -> Color {
        Color::Named(DEFAULT_WARNING)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => f.write_str(name),
            Color::Hex(digits) => write!(f, "#{}", digits),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
