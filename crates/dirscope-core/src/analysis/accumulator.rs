/// Scan-lifetime accumulation state — the Aggregator.
///
/// Owned by exactly one traversal. Every visited file is folded into three
/// structures:
///
/// - **Folder weights**: each ancestor directory of the file, from its
///   immediate parent up to and including the scan root, gains the file's
///   size exactly once.
/// - **Extension buckets**: `(count, bytes)` per normalised extension.
/// - **Top files**: a bounded top-N candidate set (see [`TopFiles`]).
///
/// All totals only ever grow while a scan runs.
use super::file_types::normalise_extension;
use super::top_files::TopFiles;
use super::TOP_FILES_LIMIT;
use crate::model::FileRecord;
use compact_str::CompactString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Aggregated `(count, bytes)` for one extension.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionBucket {
    pub count: u64,
    pub size_bytes: u64,
}

#[derive(Debug)]
pub struct ScanState {
    root: PathBuf,
    total_files: u64,
    total_bytes: u64,
    error_count: u64,
    folder_weights: HashMap<PathBuf, u64>,
    extensions: HashMap<CompactString, ExtensionBucket>,
    top_files: TopFiles,
}

impl ScanState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            total_files: 0,
            total_bytes: 0,
            error_count: 0,
            folder_weights: HashMap::with_capacity(4_096),
            extensions: HashMap::with_capacity(256),
            top_files: TopFiles::new(TOP_FILES_LIMIT),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fold one file into the accumulators.
    ///
    /// `ancestors` must yield the file's directory chain from its immediate
    /// parent up to the scan root inclusive, each directory once (see
    /// [`ancestor_chain`]).
    pub fn record<'a>(&mut self, file: FileRecord, ancestors: impl IntoIterator<Item = &'a Path>) {
        let size = file.size_bytes;
        self.total_files += 1;
        self.total_bytes += size;

        let bucket = self
            .extensions
            .entry(normalise_extension(&file.name))
            .or_default();
        bucket.count += 1;
        bucket.size_bytes += size;

        for dir in ancestors {
            // Avoid allocating an owned key for folders already present.
            match self.folder_weights.get_mut(dir) {
                Some(weight) => *weight += size,
                None => {
                    self.folder_weights.insert(dir.to_path_buf(), size);
                }
            }
        }

        self.top_files.offer(file);
    }

    /// Count one absorbed failure (unreadable directory or file).
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Cumulative weight of `dir`, or `None` if no file beneath it was seen.
    pub fn folder_weight(&self, dir: &Path) -> Option<u64> {
        self.folder_weights.get(dir).copied()
    }

    pub fn folder_weights(&self) -> impl Iterator<Item = (&Path, u64)> {
        self.folder_weights.iter().map(|(p, &w)| (p.as_path(), w))
    }

    pub fn extension_bucket(&self, extension: &str) -> Option<ExtensionBucket> {
        self.extensions.get(extension).copied()
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, ExtensionBucket)> {
        self.extensions.iter().map(|(ext, &b)| (ext.as_str(), b))
    }

    pub fn top_files(&self) -> &TopFiles {
        &self.top_files
    }
}

/// Directory chain from `dir` up to `root`, both inclusive.
///
/// Bounded by the depth of `dir` below `root`. `dir` must lie under `root`.
pub fn ancestor_chain<'a>(dir: &'a Path, root: &'a Path) -> impl Iterator<Item = &'a Path> {
    debug_assert!(dir.starts_with(root), "{dir:?} is not under {root:?}");
    let mut reached_root = false;
    dir.ancestors().take_while(move |p| {
        if reached_root {
            return false;
        }
        reached_root = *p == root;
        true
    })
}
