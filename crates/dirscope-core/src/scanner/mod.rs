/// Scanner module — runs directory scans off the caller's thread.
///
/// A [`Scanner`] owns at most one active scan. Each scan runs the
/// single-worker breadth-first [`traversal`] on a dedicated thread and
/// streams immutable [`ScanResult`] snapshots back through a bounded
/// crossbeam channel. Accumulation state never leaves the worker.
///
/// Starting a new scan while one is active cancels the previous one
/// (cancel-and-replace); the superseded scan still delivers its own
/// terminal snapshot on its own channel.
pub mod progress;
pub mod session;
pub mod traversal;

use crate::model::ScanResult;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use progress::ScanEvent;
use session::ScanSession;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Maximum number of progress snapshots that may queue up in the channel.
///
/// One snapshot is produced per 1 000 files, so 4 096 queued snapshots cover
/// a four-million-file backlog before back-pressure makes the worker wait
/// for the consumer.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// The scan currently owned by a [`Scanner`].
struct ActiveScan {
    id: u64,
    cancel_flag: Arc<AtomicBool>,
}

type ActiveSlot = Arc<Mutex<Option<ActiveScan>>>;

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress snapshots.
pub struct ScanHandle {
    /// Snapshots from the scan thread: zero or more `Progress`, then one
    /// `Finished`.
    pub events: Receiver<ScanEvent>,
    root: PathBuf,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    thread: Option<thread::JoinHandle<ScanResult>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Block until the scan finishes and return its terminal snapshot.
    pub fn wait(self) -> ScanResult {
        self.wait_with(|_| {})
    }

    /// Block until the scan finishes, passing every snapshot (interim and
    /// terminal) to `observer` on the calling thread.
    ///
    /// Draining here keeps the worker from stalling on a full channel.
    pub fn wait_with<F>(mut self, mut observer: F) -> ScanResult
    where
        F: FnMut(&ScanResult),
    {
        let mut terminal = None;
        for event in self.events.iter() {
            observer(event.snapshot());
            if event.is_final() {
                terminal = Some(event.into_snapshot());
                break;
            }
        }

        let joined = self.thread.take().map(|t| t.join());
        match (terminal, joined) {
            (Some(result), _) | (None, Some(Ok(result))) => result,
            _ => {
                error!(
                    "Scanner thread for {} ended without a result",
                    self.root.display()
                );
                ScanResult::empty(self.root.to_string_lossy())
            }
        }
    }
}

/// Runs scans one at a time on a background thread.
#[derive(Default)]
pub struct Scanner {
    active: ActiveSlot,
    next_id: AtomicU64,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start scanning `root` on a background thread.
    ///
    /// Any scan already running on this scanner is cancelled first.
    pub fn start(&self, root: impl Into<PathBuf>) -> ScanHandle {
        let root = root.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel_flag = Arc::new(AtomicBool::new(false));

        let previous = self.active.lock().replace(ActiveScan {
            id,
            cancel_flag: Arc::clone(&cancel_flag),
        });
        if let Some(previous) = previous {
            info!("Cancelling previous scan (#{}) to start {}", previous.id, root.display());
            previous.cancel_flag.store(true, Ordering::Relaxed);
        }

        let (events_tx, events_rx) =
            crossbeam_channel::bounded::<ScanEvent>(PROGRESS_CHANNEL_CAPACITY);
        let active = Arc::clone(&self.active);
        let session = ScanSession::new(root.clone(), Arc::clone(&cancel_flag));

        let thread = thread::Builder::new()
            .name("dirscope-scanner".into())
            .spawn(move || {
                traversal::scan(&session, |event| {
                    // Release the slot before the terminal snapshot is
                    // visible, so observers never see a stale "scanning".
                    if event.is_final() {
                        release(&active, id);
                    }
                    // A dropped receiver just means nobody is listening.
                    let _ = events_tx.send(event);
                })
            })
            .expect("failed to spawn scanner thread");

        ScanHandle {
            events: events_rx,
            root,
            cancel_flag,
            thread: Some(thread),
        }
    }

    /// Scan `root` off the calling thread and block until it finishes.
    pub fn scan_directory(&self, root: impl Into<PathBuf>) -> ScanResult {
        self.start(root).wait()
    }

    /// Like [`scan_directory`](Self::scan_directory), delivering every
    /// snapshot to `observer` on the calling thread as it arrives.
    pub fn scan_directory_with<F>(&self, root: impl Into<PathBuf>, observer: F) -> ScanResult
    where
        F: FnMut(&ScanResult),
    {
        self.start(root).wait_with(observer)
    }

    /// Cancel the active scan, if any. Idempotent.
    pub fn cancel(&self) {
        if let Some(active) = self.active.lock().as_ref() {
            active.cancel_flag.store(true, Ordering::Relaxed);
        }
    }

    /// Whether a scan started by this scanner is still running.
    pub fn is_scanning(&self) -> bool {
        self.active.lock().is_some()
    }
}

/// Clear the active slot if it still belongs to scan `id`.
fn release(active: &ActiveSlot, id: u64) {
    let mut slot = active.lock();
    if slot.as_ref().is_some_and(|a| a.id == id) {
        *slot = None;
    }
}
