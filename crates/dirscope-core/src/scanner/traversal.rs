/// Breadth-first directory walker — the Traversal Engine.
///
/// A single worker drains an explicit FIFO queue seeded with the scan root.
/// For each directory, entries are enumerated once: files are folded into
/// the [`ScanState`] immediately, real subdirectories are enqueued after the
/// directory has been fully read. Links to directories are never enqueued.
///
/// # Failure policy
///
/// Any failure enumerating a directory (including the root) increments the
/// error count and abandons that directory only; files already recorded
/// from it stay recorded, its subdirectories are not visited. A file whose
/// metadata cannot be read is counted as an error and skipped. Nothing
/// aborts the scan.
///
/// # Cancellation
///
/// The flag is checked before each dequeue and before each directory entry.
/// Blocking enumeration calls already in flight are not interrupted.
use crate::analysis::{ancestor_chain, snapshot, ScanState};
use crate::error::ScanError;
use crate::model::size::format_count;
use crate::model::{FileRecord, ScanResult};
use crate::platform::{classify, EntryKind};
use crate::scanner::progress::ScanEvent;
use crate::scanner::session::ScanSession;
use compact_str::CompactString;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An interim snapshot is emitted every this many files.
pub const PROGRESS_INTERVAL: u64 = 1_000;

/// Run a complete scan on the current thread.
///
/// Emits interim [`ScanEvent::Progress`] snapshots every
/// [`PROGRESS_INTERVAL`] files and always finishes with one
/// [`ScanEvent::Finished`], whose snapshot is also returned. Cancellation
/// yields a partial terminal snapshot rather than an error.
pub fn scan<F>(session: &ScanSession, mut on_event: F) -> ScanResult
where
    F: FnMut(ScanEvent),
{
    info!("Starting scan of {}", session.root().display());

    let mut state = ScanState::new(session.root());
    walk(session, &mut state, &mut on_event);

    let result = snapshot(&state, session, false);
    info!(
        "Scan of {} {}: {} files, {} errors in {}",
        result.scanned_root,
        if result.was_cancelled { "cancelled" } else { "complete" },
        format_count(result.total_files),
        result.error_count,
        result.scan_duration,
    );

    on_event(ScanEvent::Finished(result.clone()));
    result
}

/// Drain the directory queue into `state`.
pub(crate) fn walk<F>(session: &ScanSession, state: &mut ScanState, on_event: &mut F)
where
    F: FnMut(ScanEvent),
{
    let mut queue: VecDeque<PathBuf> = VecDeque::with_capacity(1_024);
    queue.push_back(session.root().to_path_buf());

    while !session.is_cancelled() {
        let Some(dir) = queue.pop_front() else {
            break;
        };

        match visit_directory(&dir, session, state, on_event) {
            Ok(subdirs) => queue.extend(subdirs),
            Err(err) => {
                state.record_error();
                warn!("Skipping directory: {err}");
            }
        }
    }

    if session.is_cancelled() {
        debug!(
            "Cancellation observed with {} directories still queued",
            queue.len()
        );
    }
}

/// Read one directory, recording its files and returning its subdirectories.
fn visit_directory<F>(
    dir: &Path,
    session: &ScanSession,
    state: &mut ScanState,
    on_event: &mut F,
) -> Result<Vec<PathBuf>, ScanError>
where
    F: FnMut(ScanEvent),
{
    let entries = fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))?;
    let mut subdirs = Vec::new();

    for entry in entries {
        if session.is_cancelled() {
            return Ok(Vec::new());
        }
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;

        match classify(&entry) {
            Ok(EntryKind::Directory) => subdirs.push(entry.path()),
            Ok(EntryKind::LinkedDirectory) => {
                debug!("Not following directory link {}", entry.path().display());
            }
            Ok(EntryKind::File { size }) => {
                let path = entry.path();
                let name = CompactString::new(entry.file_name().to_string_lossy());
                let record = FileRecord::new(name, path.to_string_lossy(), size);
                state.record(record, ancestor_chain(dir, session.root()));

                if state.total_files().is_multiple_of(PROGRESS_INTERVAL) {
                    let interim = snapshot(state, session, true);
                    debug!(
                        "Progress: {} files, {} errors",
                        format_count(interim.total_files),
                        interim.error_count
                    );
                    on_event(ScanEvent::Progress(interim));
                }
            }
            Err(err) => {
                state.record_error();
                warn!("Skipping entry: {}", ScanError::io(entry.path(), err));
            }
        }
    }

    Ok(subdirs)
}
