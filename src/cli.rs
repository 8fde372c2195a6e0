///
/// This module implements the command-line interface for srcbundle: argument parsing,
/// logging setup, the console summary and the process-level error surface.
///
/// All bundling logic (walking, encoding detection, writing) lives in the
/// [`srcbundle-core`] crate. This module is strictly CLI glue.
///
/// ## How To Use
/// - From a shell: run `srcbundle` in a project directory; `--help` lists overrides.
/// - Programmatically or from tests: call [`run`] with a constructed [`Cli`].
///
/// [`srcbundle-core`]: ../../srcbundle-core/
use crate::load_config::config_from_args;
use anyhow::{Context, Result};
use clap::Parser;
use srcbundle_core::{bundle_to_file, BundleReport, SniffingDetector};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Concatenate a project's source files into one text bundle.
#[derive(Parser, Debug, Default)]
#[clap(
    name = "srcbundle",
    version,
    about = "Concatenate source files into one bundle with a `// ======= <path> =======` header per file"
)]
pub struct Cli {
    /// Directory to scan recursively; repeat for several roots [default: src]
    #[clap(long = "root", env = "SRCBUNDLE_ROOTS", value_delimiter = ',')]
    pub roots: Vec<PathBuf>,

    /// File name suffix to include; repeat to replace the default set
    #[clap(long = "suffix")]
    pub suffixes: Vec<String>,

    /// Exact file name to include; repeat to replace the default (Dockerfile)
    #[clap(long = "name")]
    pub names: Vec<String>,

    /// Bundle file to write [default: all_code_output.txt]
    #[clap(short, long, env = "SRCBUNDLE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Compose file appended last when present [default: docker-compose.yml]
    #[clap(long, env = "SRCBUNDLE_COMPOSE_FILE", conflicts_with = "no_compose")]
    pub compose_file: Option<PathBuf>,

    /// Skip the compose file step entirely
    #[clap(long)]
    pub no_compose: bool,

    /// Visit directory entries in file-name order for reproducible output
    #[clap(long)]
    pub sorted: bool,

    /// Minimum detector confidence before falling back to UTF-8
    #[clap(long)]
    pub min_confidence: Option<f32>,

    /// Print the run report as JSON on stdout instead of the summary
    #[clap(long)]
    pub json: bool,

    /// Only log warnings and errors
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log detected encodings and matched files
    #[clap(short, long)]
    pub verbose: bool,
}

/// Installs the global `tracing` subscriber, writing to stderr.
/// `RUST_LOG` wins over `--quiet`/`--verbose`.
pub fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<BundleReport> {
    tracing::info!("bundle_started");

    let json = cli.json;
    let config = config_from_args(cli)?;
    let output = config.output.clone();

    let report = bundle_to_file(config, SniffingDetector::new())
        .with_context(|| format!("Bundling into {} failed", output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(report)
}

fn print_summary(report: &BundleReport) {
    for root in &report.missing_roots {
        println!("Skipped missing root: {}", root.display());
    }
    println!(
        "Bundled {} file(s), skipped {}.",
        report.appended(),
        report.skipped()
    );
    println!("Done! All files saved to {}", report.output.display());
}
