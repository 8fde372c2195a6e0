//! High-level run: walks every root, appends qualifying files, then the compose file.
//!
//! This module ties [`crate::scan`], [`crate::encoding`] and [`crate::writer`] together
//! into one strictly sequential pass.
//!
//! # Major Types
//! - [`Aggregator`]: holds the config and the detector for one run
//! - [`BundleReport`]: per-file outcomes, missing roots and the compose outcome
//!
//! # Error Handling
//! - A file that cannot be read is skipped and recorded; the run carries on.
//! - A missing compose file is recorded and logged; the run carries on.
//! - Failing to write the bundle, or having no root at all, stops the run with a [`BundleError`].
//!
//! # Navigation
//! - Main entrypoint: [`bundle_to_file`]
//! - Lower level: [`Aggregator::run`] against any [`std::io::Write`]

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::BundleConfig;
use crate::contract::{BundleError, BundleReport, ComposeOutcome, EncodingDetector, FileOutcome};
use crate::encoding::read_text;
use crate::scan::{scan, FilePredicate};
use crate::writer::BundleWriter;

pub struct Aggregator<D> {
    config: BundleConfig,
    detector: D,
    predicate: FilePredicate,
}

impl<D: EncodingDetector> Aggregator<D> {
    pub fn new(config: BundleConfig, detector: D) -> Self {
        let predicate = FilePredicate::from_config(&config);
        Self {
            config,
            detector,
            predicate,
        }
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Roots that are not directories. Errors when that is every root.
    pub fn check_roots(&self) -> Result<Vec<PathBuf>, BundleError> {
        let missing: Vec<PathBuf> = self
            .config
            .roots
            .iter()
            .filter(|root| !root.is_dir())
            .cloned()
            .collect();

        for root in &missing {
            warn!(root = %root.display(), "[BUNDLE] Root directory not found, skipping");
        }

        if missing.len() == self.config.roots.len() {
            return Err(BundleError::NoRoots {
                roots: self.config.roots.clone(),
            });
        }
        Ok(missing)
    }

    /// Scans a single root. Nothing is read.
    pub fn scan_root<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        scan(root, &self.predicate, self.config.sort_paths)
    }

    /// Appends every qualifying file, then the compose file, to `writer`.
    pub fn run<W: Write>(&self, writer: &mut BundleWriter<W>) -> Result<BundleReport, BundleError> {
        let missing_roots = self.check_roots()?;
        self.run_checked(writer, missing_roots)
    }

    /// `missing_roots` must come from [`Aggregator::check_roots`].
    fn run_checked<W: Write>(
        &self,
        writer: &mut BundleWriter<W>,
        missing_roots: Vec<PathBuf>,
    ) -> Result<BundleReport, BundleError> {
        let mut files = Vec::new();

        for root in &self.config.roots {
            if missing_roots.contains(root) {
                continue;
            }
            info!(root = %root.display(), "==== Processing project ====");

            for path in self.scan_root(root) {
                info!(path = %path.display(), "Processing file");
                let outcome = self.append_file(writer, &path)?;
                files.push(outcome);
            }
        }

        let compose = self.append_compose(writer)?;

        Ok(BundleReport {
            output: self.config.output.clone(),
            files,
            missing_roots,
            compose,
        })
    }

    fn append_file<W: Write>(
        &self,
        writer: &mut BundleWriter<W>,
        path: &Path,
    ) -> Result<FileOutcome, BundleError> {
        let decoded = match read_text(path, &self.detector, self.config.min_confidence) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file, skipping");
                return Ok(FileOutcome::Skipped {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        writer
            .append_record(&path.display().to_string(), &decoded.text)
            .map_err(|source| self.output_error(source))?;
        Ok(FileOutcome::appended(&decoded))
    }

    fn append_compose<W: Write>(
        &self,
        writer: &mut BundleWriter<W>,
    ) -> Result<ComposeOutcome, BundleError> {
        let Some(path) = self.config.compose_file.as_deref() else {
            return Ok(ComposeOutcome::Disabled);
        };

        if !path.exists() {
            warn!(path = %path.display(), "WARNING: compose file not found");
            return Ok(ComposeOutcome::Missing {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), "==== Processing file ====");
        let decoded = match read_text(path, &self.detector, self.config.min_confidence) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read compose file");
                return Ok(ComposeOutcome::Failed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        writer
            .append_record(&path.display().to_string(), &decoded.text)
            .map_err(|source| self.output_error(source))?;
        Ok(ComposeOutcome::Appended {
            path: path.to_path_buf(),
            encoding: decoded.encoding.to_string(),
            bytes: decoded.text.len(),
        })
    }

    fn output_error(&self, source: std::io::Error) -> BundleError {
        BundleError::Output {
            path: self.config.output.clone(),
            source,
        }
    }
}

/// Runs a full bundle into `config.output`, truncating it first.
///
/// Roots are checked before the output file is touched, so a run that cannot
/// start leaves any previous bundle in place.
pub fn bundle_to_file<D: EncodingDetector>(
    config: BundleConfig,
    detector: D,
) -> Result<BundleReport, BundleError> {
    config.trace_loaded();
    let aggregator = Aggregator::new(config, detector);
    let missing_roots = aggregator.check_roots()?;

    let output = aggregator.config().output.clone();
    let mut writer =
        BundleWriter::create(&output).map_err(|source| aggregator.output_error(source))?;
    let report = aggregator.run_checked(&mut writer, missing_roots)?;
    let records = writer.records();
    writer
        .finish()
        .map_err(|source| aggregator.output_error(source))?;

    info!(
        output = %output.display(),
        appended = report.appended(),
        skipped = report.skipped(),
        records,
        "Done! All files saved"
    );
    Ok(report)
}
