/// Error types for scanning and reporting.
///
/// Scan errors never escape a scan: the traversal logs them and folds them
/// into `ScanResult::error_count`. They exist so that each absorbed failure
/// is classified consistently in logs.
use std::path::PathBuf;
use thiserror::Error;

/// A failure reading one directory or file during a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path vanished or never existed.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Any other I/O failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an error with path context, classified by `io::ErrorKind`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PermissionDenied { path } | Self::NotFound { path } | Self::Io { path, .. } => {
                path
            }
        }
    }
}

/// A failure rendering a [`ScanResult`](crate::model::ScanResult).
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
