/// Ranker — reduces accumulation state into an immutable [`ScanResult`].
///
/// Pure and read-only: it may run at any point during traversal without
/// disturbing the accumulators. Folder and extension rankings use a partial
/// select (O(n)) before sorting only the surviving top-k.
use super::accumulator::ScanState;
use super::file_types::categorise_extension;
use super::{TOP_EXTENSIONS_LIMIT, TOP_FOLDERS_LIMIT};
use crate::model::size::format_duration;
use crate::model::{ExtensionStat, FolderEntry, ScanResult};
use crate::scanner::session::ScanSession;
use compact_str::CompactString;
use std::cmp::Ordering;
use std::path::Path;

/// Build a snapshot of `state`.
///
/// `is_scanning` is `true` for interim progress snapshots and `false` for
/// the terminal one; `was_cancelled` is only ever reported on the latter.
pub fn snapshot(state: &ScanState, session: &ScanSession, is_scanning: bool) -> ScanResult {
    let elapsed = session.elapsed();

    let folders: Vec<(&Path, u64)> = state.folder_weights().collect();
    let top_folders = top_n_by(folders, TOP_FOLDERS_LIMIT, |a, b| {
        b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
    })
    .into_iter()
    .map(|(path, weight)| FolderEntry {
        name: folder_display_name(path),
        path: path.to_string_lossy().into_owned(),
        size_bytes: weight,
    })
    .collect();

    let buckets: Vec<_> = state.extensions().collect();
    let file_types = top_n_by(buckets, TOP_EXTENSIONS_LIMIT, |a, b| {
        b.1.size_bytes
            .cmp(&a.1.size_bytes)
            .then_with(|| a.0.cmp(b.0))
    })
    .into_iter()
    .map(|(ext, bucket)| ExtensionStat {
        extension: CompactString::new(ext),
        category: categorise_extension(ext),
        count: bucket.count,
        size_bytes: bucket.size_bytes,
    })
    .collect();

    ScanResult {
        scanned_root: session.label().to_owned(),
        is_scanning,
        was_cancelled: !is_scanning && session.is_cancelled(),
        total_files: state.total_files(),
        total_bytes: state.total_bytes(),
        error_count: state.error_count(),
        started_at: session.started_at(),
        elapsed,
        scan_duration: format_duration(elapsed),
        top_files: state.top_files().sorted(),
        top_folders,
        file_types,
    }
}

/// Keep the first `n` items under `cmp`, sorted.
///
/// Returns an empty vec immediately when `n == 0`, which also avoids the
/// `n - 1` underflow inside `select_nth_unstable_by`.
fn top_n_by<T, F>(mut items: Vec<T>, n: usize, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if n == 0 {
        return Vec::new();
    }
    if items.len() > n {
        items.select_nth_unstable_by(n - 1, &mut cmp);
        items.truncate(n);
    }
    items.sort_unstable_by(cmp);
    items
}

/// Base name of a folder; roots such as `/` or `C:\` have none and show
/// their full path instead.
fn folder_display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
