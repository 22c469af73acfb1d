//! Go source discovery and reading.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Directories never entered while walking, unless named on the command line.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// `--exclude` globs.
#[derive(Debug)]
pub struct SourceFilter {
    excludes: GlobSet,
}

impl SourceFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid --exclude pattern `{pattern}`"))?;
            builder.add(glob);
        }
        let excludes = builder.build().context("failed to build exclude set")?;
        Ok(SourceFilter { excludes })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| self.excludes.is_match(Path::new(name)))
    }
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// The `.go` files under `paths`, sorted and without duplicates.
///
/// A file named directly is checked whatever its extension; directories are
/// walked for `*.go` files, skipping hidden, `vendor` and `testdata`
/// directories below the named root.
pub fn discover(paths: &[PathBuf], filter: &SourceFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        let metadata = std::fs::metadata(root)
            .with_context(|| format!("cannot access {}", root.display()))?;
        if metadata.is_file() {
            if !filter.is_excluded(root) {
                files.push(root.clone());
            }
            continue;
        }

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
        {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_go_file(path) {
                continue;
            }
            if filter.is_excluded(path) {
                trace!(path = %path.display(), "excluded");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    debug!(count = files.len(), "discovered Go files");
    Ok(files)
}

/// `(display name, text)` pairs in the order of `files`.
pub fn read_sources(files: &[PathBuf]) -> Result<Vec<(String, String)>> {
    files
        .par_iter()
        .map(|path| -> Result<(String, String)> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}
