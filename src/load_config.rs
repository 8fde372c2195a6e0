/// `load_config` module: adapts parsed command-line arguments into the core [`BundleConfig`].
///
/// This is the only place where loosely-typed user input is mapped to the run's
/// configuration. Anything not given on the command line (or its environment
/// fallback) keeps the fixed default of the tool.
///
/// # Errors
/// Errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use srcbundle_core::BundleConfig;
use tracing::{error, info};

use crate::cli::Cli;

pub fn config_from_args(cli: Cli) -> Result<BundleConfig> {
    let mut config = BundleConfig::default();

    if !cli.roots.is_empty() {
        config.roots = cli.roots;
    }
    if !cli.suffixes.is_empty() {
        config.suffixes = cli.suffixes;
    }
    if !cli.names.is_empty() {
        config.exact_names = cli.names;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.no_compose {
        config.compose_file = None;
    } else if let Some(compose_file) = cli.compose_file {
        config.compose_file = Some(compose_file);
    }
    if let Some(min_confidence) = cli.min_confidence {
        if !(0.0..=1.0).contains(&min_confidence) {
            error!(min_confidence, "min-confidence out of range");
            anyhow::bail!("--min-confidence must be between 0 and 1, got {min_confidence}");
        }
        config.min_confidence = min_confidence;
    }
    config.sort_paths = cli.sorted;

    if config.suffixes.iter().any(|s| s.is_empty()) {
        error!("Empty suffix given");
        anyhow::bail!("--suffix must not be empty: an empty suffix would match every file");
    }

    info!(
        roots = config.roots.len(),
        output = %config.output.display(),
        "Config assembled from arguments"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_arguments_keeps_defaults() {
        let config = config_from_args(Cli::default()).unwrap();
        assert_eq!(config, BundleConfig::default());
    }

    #[test]
    fn overrides_replace_defaults() {
        let cli = Cli {
            roots: vec![PathBuf::from("app")],
            suffixes: vec![".rs".into()],
            names: vec!["Makefile".into()],
            output: Some(PathBuf::from("bundle.txt")),
            compose_file: Some(PathBuf::from("deploy/compose.yaml")),
            sorted: true,
            min_confidence: Some(0.5),
            ..Cli::default()
        };
        let config = config_from_args(cli).unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("app")]);
        assert_eq!(config.suffixes, vec![".rs".to_string()]);
        assert_eq!(config.exact_names, vec!["Makefile".to_string()]);
        assert_eq!(config.output, PathBuf::from("bundle.txt"));
        assert_eq!(
            config.compose_file,
            Some(PathBuf::from("deploy/compose.yaml"))
        );
        assert!(config.sort_paths);
        assert_eq!(config.min_confidence, 0.5);
    }

    #[test]
    fn no_compose_disables_the_step() {
        let cli = Cli {
            no_compose: true,
            ..Cli::default()
        };
        assert_eq!(config_from_args(cli).unwrap().compose_file, None);
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let cli = Cli {
            min_confidence: Some(1.5),
            ..Cli::default()
        };
        let msg = config_from_args(cli).unwrap_err().to_string();
        assert!(msg.contains("min-confidence"), "got: {msg}");
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let cli = Cli {
            suffixes: vec![String::new()],
            ..Cli::default()
        };
        assert!(config_from_args(cli).is_err());
    }
}
