/// A single file discovered during a scan.
///
/// Records are immutable once built. Many are created while walking, but
/// only the largest few survive into a [`ScanResult`](super::ScanResult);
/// the rest are dropped right after aggregation.
use super::size::format_size;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name only (NOT the full path).
    pub name: CompactString,

    /// Full path as produced by directory enumeration under the scan root.
    /// Stored lossily as UTF-8 so the record always serialises.
    pub path: String,

    /// Logical file size in bytes.
    pub size_bytes: u64,
}

impl FileRecord {
    pub fn new(name: impl Into<CompactString>, path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size_bytes,
        }
    }

    /// Human-readable size, e.g. `"5.0 MB"`.
    pub fn formatted_size(&self) -> String {
        format_size(self.size_bytes)
    }
}
