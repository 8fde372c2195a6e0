//! # contract: shared types and the encoding-detection seam
//!
//! This module defines the data that flows through a bundling run and the single
//! pluggable capability the run depends on, [`EncodingDetector`].
//!
//! ## Interface & Extensibility
//! - Implement [`EncodingDetector`] to swap the detection heuristic (the default is
//!   [`crate::encoding::SniffingDetector`]).
//! - The trait is annotated for `mockall`, so tests can force any detection result.
//!
//! ## Outcomes instead of exceptions
//! A file that cannot be read is not an error of the run. It is recorded as
//! [`FileOutcome::Skipped`] in the [`BundleReport`]. Only [`BundleError`] aborts a run.

use encoding_rs::Encoding;
use serde::Serialize;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Result of inspecting raw bytes. `encoding` is `None` when nothing could be guessed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub encoding: Option<&'static Encoding>,
    /// In `[0.0, 1.0]`.
    pub confidence: f32,
}

impl Detection {
    pub fn certain(encoding: &'static Encoding) -> Self {
        Self {
            encoding: Some(encoding),
            confidence: 1.0,
        }
    }

    pub fn unknown() -> Self {
        Self {
            encoding: None,
            confidence: 0.0,
        }
    }
}

/// Best-effort guess of the text encoding of a byte buffer.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait EncodingDetector {
    fn detect(&self, bytes: &[u8]) -> Detection;
}

/// A qualifying file after decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    pub path: PathBuf,
    /// Name of the encoding actually used, e.g. `UTF-8` or `windows-1252`.
    pub encoding: &'static str,
    pub text: String,
    /// Malformed sequences were replaced by U+FFFD.
    pub had_replacements: bool,
}

/// What happened to one discovered file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Appended {
        path: PathBuf,
        encoding: String,
        bytes: usize,
        had_replacements: bool,
    },
    Skipped {
        path: PathBuf,
        reason: String,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileOutcome::Appended { path, .. } | FileOutcome::Skipped { path, .. } => path,
        }
    }

    pub fn appended(decoded: &DecodedText) -> Self {
        FileOutcome::Appended {
            path: decoded.path.clone(),
            encoding: decoded.encoding.to_string(),
            bytes: decoded.text.len(),
            had_replacements: decoded.had_replacements,
        }
    }
}

/// What happened to the optional compose file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComposeOutcome {
    Appended {
        path: PathBuf,
        encoding: String,
        bytes: usize,
    },
    Missing {
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        reason: String,
    },
    Disabled,
}

/// Summary of one run, alongside the written bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleReport {
    pub output: PathBuf,
    /// In discovery order.
    pub files: Vec<FileOutcome>,
    pub missing_roots: Vec<PathBuf>,
    pub compose: ComposeOutcome,
}

impl BundleReport {
    pub fn appended(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f, FileOutcome::Appended { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f, FileOutcome::Skipped { .. }))
            .count()
    }

    /// Header blocks written to the bundle, compose file included.
    pub fn blocks(&self) -> usize {
        self.appended() + usize::from(matches!(self.compose, ComposeOutcome::Appended { .. }))
    }
}

/// Failures that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("none of the configured roots exist: {roots:?}")]
    NoRoots { roots: Vec<PathBuf> },
    #[error("cannot write bundle to {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
