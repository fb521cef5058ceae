/// A single scan invocation's identity, clock and cancellation flag.
///
/// Owned by the worker running the scan and dropped when the scan returns.
/// The cancellation flag is shared with the [`ScanHandle`](super::ScanHandle)
/// so other threads can request a stop.
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ScanSession {
    root: PathBuf,
    label: String,
    cancel_flag: Arc<AtomicBool>,
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl ScanSession {
    /// Start the session clock now.
    pub fn new(root: PathBuf, cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            label: root.to_string_lossy().into_owned(),
            root,
            cancel_flag,
            started_at: Utc::now(),
            clock: Instant::now(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Display label of the scanned root.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }
}
