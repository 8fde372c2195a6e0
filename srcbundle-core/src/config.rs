use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Suffixes a file name may end with to be bundled.
/// `Dockerfile` is matched as a suffix too, so `app.Dockerfile` qualifies.
pub const DEFAULT_SUFFIXES: &[&str] = &[
    ".java",
    ".xml",
    ".yaml",
    ".yml",
    "Dockerfile",
    ".jsx",
    ".gradle",
];

/// File names that qualify regardless of suffix.
pub const DEFAULT_EXACT_NAMES: &[&str] = &["Dockerfile"];

pub const DEFAULT_ROOT: &str = "src";
pub const DEFAULT_OUTPUT: &str = "all_code_output.txt";
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Below this confidence a detection is discarded in favour of UTF-8.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.2;

/// Everything a single bundling run needs. Immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Directories scanned recursively, in this order.
    pub roots: Vec<PathBuf>,
    pub suffixes: Vec<String>,
    pub exact_names: Vec<String>,
    /// Bundle file, truncated at the start of every run.
    pub output: PathBuf,
    /// Appended last when present. Relative paths resolve against the working directory.
    pub compose_file: Option<PathBuf>,
    /// Sort directory entries by file name instead of using raw listing order.
    pub sort_paths: bool,
    pub min_confidence: f32,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(DEFAULT_ROOT)],
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            exact_names: DEFAULT_EXACT_NAMES.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            compose_file: Some(PathBuf::from(DEFAULT_COMPOSE_FILE)),
            sort_paths: false,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl BundleConfig {
    pub fn trace_loaded(&self) {
        info!(
            roots = ?self.roots,
            output = %self.output.display(),
            suffixes = self.suffixes.len(),
            sorted = self.sort_paths,
            "Loaded bundle config"
        );
        debug!(?self, "Bundle config loaded (full debug)");
    }
}
