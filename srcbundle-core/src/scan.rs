//! Recursive discovery of qualifying files under one root.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::BundleConfig;

/// Inclusion test for file names: suffix match or exact name match.
#[derive(Debug, Clone)]
pub struct FilePredicate {
    suffixes: Vec<String>,
    exact_names: Vec<String>,
}

impl FilePredicate {
    pub fn new(
        suffixes: impl IntoIterator<Item = impl Into<String>>,
        exact_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            exact_names: exact_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &BundleConfig) -> Self {
        Self::new(config.suffixes.iter().cloned(), config.exact_names.iter().cloned())
    }

    /// Only the final path component is inspected.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.exact_names.iter().any(|n| n.as_str() == name.as_ref())
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Lazily yields qualifying regular files under `root`, subdirectories included.
///
/// Without `sorted` the order is whatever the platform's directory listing gives,
/// so it may differ across operating systems. With `sorted` entries are visited by
/// file name within each directory. Entries that cannot be read are logged and skipped.
pub fn scan<'a>(
    root: &Path,
    predicate: &'a FilePredicate,
    sorted: bool,
) -> impl Iterator<Item = PathBuf> + 'a {
    let mut walker = WalkDir::new(root);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(is_file_or_file_link)
        .filter(move |entry| predicate.matches(entry.path()))
        .map(|entry| {
            debug!(path = %entry.path().display(), "Matched file");
            entry.into_path()
        })
}

/// Regular files, plus symlinks that do not point at a directory. Dangling links are
/// kept so the read step reports them. Linked directories are never descended into.
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && !fs::metadata(entry.path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
}
