/// Immutable scan snapshots handed to observers and callers.
///
/// A `ScanResult` is rebuilt from the accumulation state at every progress
/// emission and once more at completion. Nothing in it aliases live scan
/// state, so it can cross thread boundaries freely.
use super::file_record::FileRecord;
use super::size::{format_duration, format_size};
use crate::analysis::FileCategory;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A folder ranked by its cumulative weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Base name of the folder (the full path for roots like `/`).
    pub name: String,
    /// Full path of the folder.
    pub path: String,
    /// Sum of all file sizes anywhere beneath this folder.
    pub size_bytes: u64,
}

impl FolderEntry {
    pub fn formatted_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Aggregated statistics for one normalised extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStat {
    /// Lower-cased extension without the dot, or `"none"`.
    pub extension: CompactString,
    /// Broad category the extension belongs to.
    pub category: FileCategory,
    /// Number of files in this bucket.
    pub count: u64,
    /// Cumulative bytes of the files in this bucket.
    pub size_bytes: u64,
}

impl ExtensionStat {
    pub fn formatted_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Point-in-time view of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Label of the scanned root (its path as given to the scanner).
    pub scanned_root: String,
    /// `true` for interim snapshots, `false` for the single terminal one.
    pub is_scanning: bool,
    /// `true` if the scan stopped early because cancellation was requested.
    pub was_cancelled: bool,
    /// Number of files visited so far.
    pub total_files: u64,
    /// Sum of the sizes of all visited files.
    pub total_bytes: u64,
    /// Directories (and individual files) that could not be read.
    pub error_count: u64,
    /// Wall-clock time the scan started.
    pub started_at: DateTime<Utc>,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
    /// `elapsed` formatted as `MM:SS`.
    pub scan_duration: String,
    /// Largest files, descending by size (at most 20).
    pub top_files: Vec<FileRecord>,
    /// Heaviest folders, descending by weight (at most 10).
    pub top_folders: Vec<FolderEntry>,
    /// Extension buckets, descending by cumulative bytes (at most 10).
    pub file_types: Vec<ExtensionStat>,
}

impl ScanResult {
    /// The state shown before any scan has produced data.
    pub fn empty(scanned_root: impl Into<String>) -> Self {
        Self {
            scanned_root: scanned_root.into(),
            is_scanning: false,
            was_cancelled: false,
            total_files: 0,
            total_bytes: 0,
            error_count: 0,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            scan_duration: format_duration(Duration::ZERO),
            top_files: Vec::new(),
            top_folders: Vec::new(),
            file_types: Vec::new(),
        }
    }

    /// Human-readable total size.
    pub fn formatted_total_size(&self) -> String {
        format_size(self.total_bytes)
    }
}
