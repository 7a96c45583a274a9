//! funclines CLI - reports the line count of every function body

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - Stdout carries only report output; logs and progress go to stderr

use anyhow::Context;
use clap::{Parser, Subcommand};
use funclines_core::analysis;
use funclines_core::body::BracePlacement;
use funclines_core::config::{self, ResolvedConfig};
use funclines_core::discover;
use funclines_core::report::Palette;
use funclines_core::signature::SignatureMode;
use funclines_core::{
    annotate, finish_entries, render_annotations, render_json, render_text, AnalysisOptions,
    FunctionEntry, SortOrder,
};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "funclines")]
#[command(about = "Report the line count of every function body in brace-delimited source files")]
#[command(version = env!("FUNCLINES_VERSION"))]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan source files and report function body lengths
    Scan {
        /// Path to source file or directory, or `-` for stdin
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Body length above which a function is flagged (overrides config file)
        #[arg(long)]
        max_lines: Option<usize>,

        /// Show only top N results (overrides config file)
        #[arg(long)]
        top: Option<usize>,

        /// Minimum body length to report (overrides config file)
        #[arg(long)]
        min_lines: Option<usize>,

        /// Report only functions over the limit
        #[arg(long)]
        warnings_only: bool,

        /// Result ordering
        #[arg(long, default_value = "source")]
        sort: SortArg,

        /// Accept `) {` and indented opening braces
        #[arg(long)]
        lenient_braces: bool,

        /// Ignore parens and semicolons inside literals in parameter lists
        #[arg(long)]
        literal_aware_signatures: bool,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit with status 1 if any function is over the limit
        #[arg(long)]
        fail_on_warning: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Validate or inspect configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without scanning
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Annotations,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortArg {
    Source,
    Lines,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Source => SortOrder::Source,
            SortArg::Lines => SortOrder::Lines,
        }
    }
}

/// Scan flags that override the config file
struct ScanOverrides {
    max_lines: Option<usize>,
    lenient_braces: bool,
    literal_aware_signatures: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan {
            path,
            format,
            max_lines,
            top,
            min_lines,
            warnings_only,
            sort,
            lenient_braces,
            literal_aware_signatures,
            config: config_path,
            fail_on_warning,
            no_progress,
        } => {
            let from_stdin = path.as_os_str() == "-";

            if !from_stdin && !path.exists() {
                anyhow::bail!("Path does not exist: {}", path.display());
            }

            // Load configuration
            let cwd = std::env::current_dir()?;
            let search_from = if from_stdin { cwd.clone() } else { cwd.join(&path) };
            let project_root = find_repo_root(&search_from).unwrap_or_else(|_| {
                if search_from.is_file() {
                    search_from.parent().map(Path::to_path_buf).unwrap_or(cwd)
                } else {
                    search_from.clone()
                }
            });
            let mut resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(config_path) = &resolved.config_path {
                tracing::info!("Using config: {}", config_path.display());
            }

            // CLI flags override config file values
            apply_overrides(
                &mut resolved,
                ScanOverrides {
                    max_lines,
                    lenient_braces,
                    literal_aware_signatures,
                },
            )?;
            let options = AnalysisOptions {
                min_lines: min_lines.or(resolved.min_lines),
                top_n: top.or(resolved.top_n),
                warnings_only: warnings_only || resolved.warnings_only,
                sort: sort.into(),
            };

            let entries = if from_stdin {
                let mut src = String::new();
                std::io::stdin()
                    .read_to_string(&mut src)
                    .context("failed to read stdin")?;
                analysis::analyze_source("<stdin>", &src, &resolved.scan)
            } else {
                scan_path(&path, &resolved, no_progress)?
            };

            let any_warning = entries.iter().any(|e| e.report.is_warning());
            let entries = finish_entries(entries, &options);

            match format {
                OutputFormat::Text => print!("{}", render_text(&entries)),
                OutputFormat::Json => println!("{}", render_json(&entries)),
                OutputFormat::Annotations => {
                    print!("{}", render_annotations(&annotate(&entries, &resolved.palette)))
                }
            }

            if fail_on_warning && any_warning {
                std::process::exit(1);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;
                print!("{}", render_config(&resolved));
            }
        },
    }

    Ok(())
}

/// Install the stderr log subscriber
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn apply_overrides(resolved: &mut ResolvedConfig, overrides: ScanOverrides) -> anyhow::Result<()> {
    if let Some(max) = overrides.max_lines {
        if max == 0 {
            anyhow::bail!("--max-lines must be at least 1");
        }
        resolved.scan.max_lines = max;
    }
    if overrides.lenient_braces {
        resolved.scan.brace_placement = BracePlacement::Lenient;
    }
    if overrides.literal_aware_signatures {
        resolved.scan.signature_mode = SignatureMode::LiteralAware;
    }
    Ok(())
}

/// Discover and scan files under `path`, with a progress bar for directories
fn scan_path(
    path: &Path,
    resolved: &ResolvedConfig,
    no_progress: bool,
) -> anyhow::Result<Vec<FunctionEntry>> {
    let files = discover::collect_source_files(path, resolved)?;
    tracing::debug!(files = files.len(), "discovered source files");

    let progress = if no_progress || files.len() < 2 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} files")
                .context("invalid progress template")?
                .progress_chars("=> "),
        );
        bar
    };

    let results: Vec<_> = files
        .par_iter()
        .progress_with(progress.clone())
        .map(|file| analysis::analyze_file(file, &resolved.scan))
        .collect();
    progress.finish_and_clear();

    let (entries, skipped) = analysis::merge_results(&files, results);
    if skipped > 0 {
        tracing::warn!("skipped {} file(s) due to read errors", skipped);
    }
    Ok(entries)
}

/// Human-readable dump of the resolved configuration
fn render_config(resolved: &ResolvedConfig) -> String {
    let mut out = String::new();
    out.push_str("Configuration:\n");
    match &resolved.config_path {
        Some(p) => out.push_str(&format!("  Source: {}\n", p.display())),
        None => out.push_str("  Source: defaults (no config file found)\n"),
    }
    out.push('\n');
    out.push_str("Scan:\n");
    out.push_str(&format!("  max_lines: {}\n", resolved.scan.max_lines));
    out.push_str(&format!(
        "  braces: {}\n",
        match resolved.scan.brace_placement {
            BracePlacement::NextLine => "next line",
            BracePlacement::Lenient => "lenient",
        }
    ));
    out.push_str(&format!(
        "  signatures: {}\n",
        match resolved.scan.signature_mode {
            SignatureMode::Baseline => "baseline",
            SignatureMode::LiteralAware => "literal-aware",
        }
    ));
    out.push('\n');
    out.push_str(&render_palette(&resolved.palette));
    out.push('\n');
    out.push_str("Filters:\n");
    out.push_str(&format!("  warnings_only: {}\n", resolved.warnings_only));
    out.push_str(&format!("  min_lines: {}\n", display_opt(resolved.min_lines)));
    out.push_str(&format!("  top: {}\n", display_opt(resolved.top_n)));
    out.push_str(&format!(
        "  include: {}\n",
        if resolved.include.is_some() {
            "custom patterns"
        } else {
            "all files"
        }
    ));
    out.push_str(&format!("  extensions: {}\n", resolved.extensions.join(", ")));
    out
}

fn render_palette(palette: &Palette) -> String {
    format!(
        "Colors:\n  neutral: {}\n  warning: {}\n",
        palette.neutral, palette.warning
    )
}

fn display_opt(value: Option<usize>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Find git repository root by searching up the directory tree
fn find_repo_root(start_path: &Path) -> anyhow::Result<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid file path"))?
            .to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        if current.join(".git").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => {
                current = parent.to_path_buf();
            }
            None => {
                anyhow::bail!("not in a git repository (no .git directory found)");
            }
        }
    }
}
