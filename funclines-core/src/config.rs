//! Configuration file support for funclines
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.funclinesrc.json` in project root
//! 3. `funclines.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::body::BracePlacement;
use crate::color::{Color, DEFAULT_NEUTRAL, DEFAULT_WARNING};
use crate::discover::DEFAULT_EXTENSIONS;
use crate::report::Palette;
use crate::scan::{ScanOptions, DEFAULT_MAX_LINES};
use crate::signature::SignatureMode;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default exclude patterns applied when no config is specified
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/vendor/**",
    "**/third_party/**",
    "**/target/**",
    "**/dist/**",
    "**/build/**",
    "**/*.min.js",
];

/// funclines configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunclinesConfig {
    /// Glob patterns for files to include (default: all supported extensions)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: vendored and build output)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to scan, without the dot (default: common brace languages)
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Body length above which a function is flagged (default: 25)
    #[serde(default)]
    pub max_lines: Option<usize>,

    /// Color for functions within the limit (default: gray)
    #[serde(default)]
    pub neutral_color: Option<String>,

    /// Color for functions over the limit (default: red)
    #[serde(default)]
    pub warning_color: Option<String>,

    /// Accept `) {` and indented braces, not only `)\n{`
    #[serde(default)]
    pub lenient_braces: Option<bool>,

    /// Ignore parens and semicolons inside literals/comments in parameter lists
    #[serde(default)]
    pub literal_aware_signatures: Option<bool>,

    /// Report only functions over the limit
    #[serde(default)]
    pub warnings_only: Option<bool>,

    /// Minimum body length to report
    #[serde(default)]
    pub min_lines: Option<usize>,

    /// Maximum number of results to show
    #[serde(default)]
    pub top: Option<usize>,
}

/// Resolved configuration with compiled glob patterns
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (empty means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    /// Lowercased extensions, without the dot
    pub extensions: Vec<String>,
    pub scan: ScanOptions,
    pub palette: Palette,
    /// Filters
    pub warnings_only: bool,
    pub min_lines: Option<usize>,
    pub top_n: Option<usize>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl FunclinesConfig {
    /// Validate the configuration for logical errors
    ///
    /// Colors are not validated here: an invalid color falls back to its
    /// default when the config is resolved.
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_lines {
            if max == 0 {
                anyhow::bail!("max_lines must be at least 1 (got {})", max);
            }
        }

        if let Some(top) = self.top {
            if top == 0 {
                anyhow::bail!("top must be at least 1 (got {})", top);
            }
        }

        for ext in &self.extensions {
            let trimmed = ext.trim_start_matches('.');
            if trimmed.is_empty() || trimmed.contains(['/', '\\', '*']) {
                anyhow::bail!("invalid extension: {:?}", ext);
            }
        }

        // Validate glob patterns compile
        for pattern in &self.include {
            Glob::new(pattern).with_context(|| format!("invalid include pattern: {}", pattern))?;
        }
        for pattern in &self.exclude {
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern: {}", pattern))?;
        }

        Ok(())
    }

    /// Resolve config into compiled form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let include = if self.include.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &self.include {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };

        // User excludes replace the defaults rather than extending them
        let exclude = {
            let mut builder = GlobSetBuilder::new();
            if self.exclude.is_empty() {
                for pattern in DEFAULT_EXCLUDES {
                    builder.add(Glob::new(pattern)?);
                }
            } else {
                for pattern in &self.exclude {
                    builder.add(Glob::new(pattern)?);
                }
            }
            builder.build()?
        };

        let extensions = if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        };

        let scan = ScanOptions {
            max_lines: self.max_lines.unwrap_or(DEFAULT_MAX_LINES),
            brace_placement: if self.lenient_braces.unwrap_or(false) {
                BracePlacement::Lenient
            } else {
                BracePlacement::NextLine
            },
            signature_mode: if self.literal_aware_signatures.unwrap_or(false) {
                SignatureMode::LiteralAware
            } else {
                SignatureMode::Baseline
            },
        };

        let palette = Palette {
            neutral: Color::parse_or(self.neutral_color.as_deref(), DEFAULT_NEUTRAL),
            warning: Color::parse_or(self.warning_color.as_deref(), DEFAULT_WARNING),
        };

        Ok(ResolvedConfig {
            include,
            exclude,
            extensions,
            scan,
            palette,
            warnings_only: self.warnings_only.unwrap_or(false),
            min_lines: self.min_lines,
            top_n: self.top,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Check if a file path should be included based on include/exclude patterns
    pub fn should_include(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        // Check exclude first
        if self.exclude.is_match(path_str.as_ref()) {
            return false;
        }

        // If include patterns exist, file must match at least one
        if let Some(ref include) = self.include {
            return include.is_match(path_str.as_ref());
        }

        true
    }

    /// Check if a file name carries one of the configured extensions
    pub fn has_supported_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FunclinesConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.funclinesrc.json`
/// 2. `funclines.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(FunclinesConfig, PathBuf)>> {
    for name in [".funclinesrc.json", "funclines.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FunclinesConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FunclinesConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (FunclinesConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
