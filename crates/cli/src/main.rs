//! mta-navcrumbs CLI
//!
//! Resolve, index and validate breadcrumb trails for a static site's
//! navigation data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_navcrumbs_core::{
    format_index, format_report, format_trail, index_forest, resolve_trail, validate, LoadConfig,
    LoadedForest, MatchMode, NavigationLoader, OutputFormat,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

/// Navigation breadcrumbs for static documentation sites
#[derive(Parser)]
#[command(name = "mta-navcrumbs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and render breadcrumb trails from site navigation data")]
#[command(long_about = r#"
mta-navcrumbs: Navigation Breadcrumbs for Static Sites

Reads a site's navigation tree (JSON or YAML, one file or a directory of
files), finds the entry for a page path and prints the chain of ancestors
leading to it. The first match in document order wins.

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - HTML - <nav> markup with links and a current-page span
  - Text - Labels joined by " / "
  - ANSI - Colorful terminal output

Examples:
  mta-navcrumbs resolve /guides/setup --nav data/navigation
  mta-navcrumbs resolve /guides/setup/ --match-mode ignore-trailing-slash
  mta-navcrumbs index --nav data/navigation --format text
  mta-navcrumbs validate --nav data/navigation --strict
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Navigation data file or directory
    #[arg(short, long, global = true, default_value = ".")]
    pub nav: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormatArg::Json)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// How page paths are compared
    #[arg(long, global = true, value_enum, default_value_t = MatchModeArg::Exact)]
    pub match_mode: MatchModeArg,

    /// Ignore patterns (can be specified multiple times)
    #[arg(long, global = true, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Number of threads for parallel loading (default: auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the breadcrumb trail for one page path
    Resolve {
        /// Page path, e.g. /guides/setup
        target: String,
    },

    /// Print the breadcrumb trail of every page
    Index,

    /// Report duplicate and empty paths in the navigation data
    Validate {
        /// Exit with an error when any issue is found
        #[arg(long)]
        strict: bool,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Text,
    Html,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Html => OutputFormat::Html,
        }
    }
}

/// Match mode argument
#[derive(ValueEnum, Clone, Debug)]
pub enum MatchModeArg {
    Exact,
    IgnoreTrailingSlash,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Exact => MatchMode::Exact,
            MatchModeArg::IgnoreTrailingSlash => MatchMode::IgnoreTrailingSlash,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Color codes only make sense on a terminal
    if args.output.is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match &args.command {
        Commands::Resolve { target } => run_resolve(target, &args),
        Commands::Index => run_index(&args),
        Commands::Validate { strict } => run_validate(*strict, &args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build loader configuration from args
fn build_config(args: &Args) -> LoadConfig {
    let mut config = LoadConfig::new(args.nav.clone()).with_ignore_patterns(args.ignore.clone());

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    config
}

fn load(args: &Args) -> Result<LoadedForest> {
    let config = build_config(args);

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?;
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Loading navigation data...");
        Some(pb)
    } else {
        None
    };

    let result = NavigationLoader::new(config)
        .context("Failed to create loader")
        .and_then(|loader| {
            loader.load().with_context(|| {
                format!("Failed to load navigation data from {}", args.nav.display())
            })
        });

    if let Some(ref pb) = spinner {
        finish_spinner(pb, &result);
    }
    let loaded = result?;

    tracing::debug!(
        roots = loaded.stats.roots,
        nodes = loaded.stats.total_nodes,
        "navigation loaded"
    );

    Ok(loaded)
}

/// Leave a summary line on success; clear the spinner before an error is printed
fn finish_spinner(pb: &ProgressBar, result: &Result<LoadedForest>) {
    match result {
        Ok(loaded) => pb.finish_with_message(format!(
            "Loaded {} nodes from {} files in {}ms",
            loaded.stats.total_nodes,
            loaded.sources.len(),
            loaded.metadata.load_duration_ms
        )),
        Err(_) => pb.finish_and_clear(),
    }
}

fn run_resolve(target: &str, args: &Args) -> Result<()> {
    let loaded = load(args)?;
    let trail = resolve_trail(&loaded.forest, target, args.match_mode.clone().into());

    if trail.is_empty() {
        tracing::info!(target_path = %target, "no navigation entry matches");
    }

    let output = format_trail(&trail, args.format.clone().into())?;
    write_output(&output, args.output.as_deref())
}

fn run_index(args: &Args) -> Result<()> {
    let loaded = load(args)?;
    let index = index_forest(&loaded.forest, args.match_mode.clone().into());

    let output = format_index(&index, args.format.clone().into())?;
    write_output(&output, args.output.as_deref())
}

fn run_validate(strict: bool, args: &Args) -> Result<()> {
    let loaded = load(args)?;
    let report = validate(&loaded, args.match_mode.clone().into());

    let output = format_report(&report, args.format.clone().into())?;
    write_output(&output, args.output.as_deref())?;

    if strict && !report.is_clean() {
        anyhow::bail!(
            "Navigation data has {} duplicate path(s) and {} empty path(s)",
            report.stats.duplicate_paths,
            report.stats.empty_paths
        );
    }

    Ok(())
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mta_navcrumbs_core::load_forest;

    #[test]
    fn spinner_is_cleared_when_load_fails() {
        let pb = ProgressBar::hidden();
        let result = load_forest(Path::new("/definitely/not/here"))
            .context("Failed to load navigation data");
        assert!(result.is_err());

        finish_spinner(&pb, &result);
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "");
    }
}
