/// End-to-end scanner integration tests.
///
/// These tests exercise the real `Scanner` against a real temporary
/// filesystem: background thread, breadth-first walk, aggregation, ranking
/// and the progress channel, with zero mocking.
use dirscope_core::scanner::{Scanner, PROGRESS_CHANNEL_CAPACITY};
use dirscope_core::{ScanEvent, ScanResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Create a reproducible directory tree for scanner tests:
///
/// ```text
/// root/
///   alpha/
///     a.txt   (100 bytes)
///     b.rs    (200 bytes)
///   beta/
///     c.png   (300 bytes)
///   d.zip     (400 bytes)
/// ```
///
/// Total file bytes: 1 000.
fn build_test_tree(root: &Path) {
    let alpha = root.join("alpha");
    let beta = root.join("beta");
    fs::create_dir_all(&alpha).unwrap();
    fs::create_dir_all(&beta).unwrap();

    write_bytes(&alpha.join("a.txt"), 100);
    write_bytes(&alpha.join("b.rs"), 200);
    write_bytes(&beta.join("c.png"), 300);
    write_bytes(&root.join("d.zip"), 400);
}

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

fn folder_weight(result: &ScanResult, path: &Path) -> Option<u64> {
    let path = path.to_string_lossy();
    result
        .top_folders
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.size_bytes)
}

/// Drain all events from a scan, returning them in arrival order (or
/// panicking after a generous timeout).
fn drain_events(handle: &dirscope_core::ScanHandle) -> Vec<ScanEvent> {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    let mut events = Vec::new();
    loop {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner did not finish within 30 seconds"
        );
        match handle.events.recv_timeout(Duration::from_millis(50)) {
            Ok(event) => {
                let done = event.is_final();
                events.push(event);
                if done {
                    return events;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                panic!("scanner channel disconnected before Finished was sent");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn scan_discovers_all_files() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let result = Scanner::new().scan_directory(tmp.path());

    assert!(!result.is_scanning);
    assert!(!result.was_cancelled);
    assert_eq!(result.total_files, 4);
    assert_eq!(result.total_bytes, 1_000);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.scanned_root, tmp.path().to_string_lossy());

    let sizes: Vec<u64> = result.top_files.iter().map(|f| f.size_bytes).collect();
    assert_eq!(sizes, vec![400, 300, 200, 100]);
    assert_eq!(result.top_files[0].name, "d.zip");

    assert_eq!(folder_weight(&result, tmp.path()), Some(1_000));
    assert_eq!(folder_weight(&result, &tmp.path().join("alpha")), Some(300));
    assert_eq!(folder_weight(&result, &tmp.path().join("beta")), Some(300));
}

/// root/a.txt (10 B) + root/sub/b.log (20 B).
#[test]
fn two_file_scenario_matches_expected_totals() {
    let tmp = TempDir::new().unwrap();
    let sub = tmp.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write_bytes(&tmp.path().join("a.txt"), 10);
    write_bytes(&sub.join("b.log"), 20);

    let result = Scanner::new().scan_directory(tmp.path());

    assert_eq!(result.total_files, 2);
    assert_eq!(folder_weight(&result, tmp.path()), Some(30));
    assert_eq!(folder_weight(&result, &sub), Some(20));

    let buckets: Vec<(&str, u64, u64)> = result
        .file_types
        .iter()
        .map(|s| (s.extension.as_str(), s.count, s.size_bytes))
        .collect();
    assert_eq!(buckets, vec![("log", 1, 20), ("txt", 1, 10)]);
}

/// Scans of an empty directory succeed with nothing found.
#[test]
fn scan_empty_directory() {
    let tmp = TempDir::new().expect("failed to create temp dir");

    let result = Scanner::new().scan_directory(tmp.path());
    assert_eq!(result.total_files, 0);
    assert_eq!(result.total_bytes, 0);
    assert_eq!(result.error_count, 0);
    assert!(result.top_files.is_empty());
    assert!(result.top_folders.is_empty());
    assert!(result.file_types.is_empty());
}

#[test]
fn unreachable_root_still_returns_result() {
    let tmp = TempDir::new().unwrap();
    let result = Scanner::new().scan_directory(tmp.path().join("missing"));
    assert!(!result.is_scanning);
    assert_eq!(result.total_files, 0);
    assert_eq!(result.error_count, 1);
}

/// Bucket counts sum to the total and bucket bytes match per-extension sums.
#[test]
fn extension_buckets_account_for_every_file() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("x").join("y");
    fs::create_dir_all(&nested).unwrap();
    write_bytes(&tmp.path().join("one.TXT"), 5);
    write_bytes(&tmp.path().join("two.txt"), 7);
    write_bytes(&nested.join("README"), 11);
    write_bytes(&nested.join("img.png"), 13);

    let result = Scanner::new().scan_directory(tmp.path());
    let count_sum: u64 = result.file_types.iter().map(|s| s.count).sum();
    assert_eq!(count_sum, result.total_files);

    let txt = result.file_types.iter().find(|s| s.extension == "txt").unwrap();
    assert_eq!((txt.count, txt.size_bytes), (2, 12));
    let none = result.file_types.iter().find(|s| s.extension == "none").unwrap();
    assert_eq!((none.count, none.size_bytes), (1, 11));
}

/// Scanning an unchanged tree twice gives the same aggregates.
#[test]
fn repeated_scans_are_idempotent() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let scanner = Scanner::new();
    let first = scanner.scan_directory(tmp.path());
    let second = scanner.scan_directory(tmp.path());

    assert_eq!(first.total_files, second.total_files);
    assert_eq!(first.total_bytes, second.total_bytes);
    assert_eq!(first.top_folders, second.top_folders);
    assert_eq!(first.file_types, second.file_types);
}

/// Progress arrives in strictly increasing order, then exactly one final
/// snapshot, which is the only one not scanning.
#[test]
fn progress_is_monotonic_and_ends_with_one_final() {
    let tmp = TempDir::new().unwrap();
    for d in 0..3 {
        let dir = tmp.path().join(format!("d{d}"));
        fs::create_dir(&dir).unwrap();
        for i in 0..700 {
            write_bytes(&dir.join(format!("{i}.bin")), 1);
        }
    }

    let handle = Scanner::new().start(tmp.path());
    let events = drain_events(&handle);

    let (last, interim) = events.split_last().unwrap();
    assert!(last.is_final());
    assert!(!last.snapshot().is_scanning);
    assert_eq!(last.snapshot().total_files, 2_100);

    let counts: Vec<u64> = interim.iter().map(|e| e.snapshot().total_files).collect();
    assert_eq!(counts, vec![1_000, 2_000]);
    assert!(interim.iter().all(|e| e.snapshot().is_scanning && !e.is_final()));
}

#[test]
fn observer_sees_every_snapshot_on_caller_thread() {
    let tmp = TempDir::new().unwrap();
    for i in 0..1_500 {
        write_bytes(&tmp.path().join(format!("{i}.dat")), 2);
    }

    let caller = std::thread::current().id();
    let mut seen = Vec::new();
    let result = Scanner::new().scan_directory_with(tmp.path(), |snapshot| {
        assert_eq!(std::thread::current().id(), caller);
        seen.push((snapshot.total_files, snapshot.is_scanning));
    });

    assert_eq!(seen, vec![(1_000, true), (1_500, false)]);
    assert_eq!(result.total_files, 1_500);
}

/// Cancellation must stop the scan gracefully and still deliver a final,
/// not-scanning snapshot.
#[test]
fn cancellation_still_delivers_final_snapshot() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let handle = Scanner::new().start(tmp.path());
    // The scanner may already be done by the time the flag is read, so the
    // result may be complete or partial.
    handle.cancel();
    assert!(handle.is_cancelled());

    let result = handle.wait();
    assert!(!result.is_scanning);
    assert!(result.total_files <= 4);
}

#[test]
fn scanner_cancel_is_idempotent_without_active_scan() {
    let scanner = Scanner::new();
    scanner.cancel();
    scanner.cancel();
    assert!(!scanner.is_scanning());
}

/// Starting a second scan cancels the first (cancel-and-replace).
#[test]
fn new_scan_cancels_previous_one() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let scanner = Scanner::new();
    let first = scanner.start(tmp.path());
    let second = scanner.start(tmp.path());
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());

    let first_result = first.wait();
    assert!(!first_result.is_scanning);

    let second_result = second.wait();
    assert_eq!(second_result.total_files, 4);
    assert!(!second_result.was_cancelled);
    assert!(!scanner.is_scanning());
}

/// A handle whose receiver is dropped must not stall the worker.
#[test]
fn dropped_handle_does_not_block_scanner() {
    let tmp = TempDir::new().unwrap();
    for i in 0..2_000 {
        write_bytes(&tmp.path().join(format!("{i}.dat")), 1);
    }

    let scanner = Scanner::new();
    drop(scanner.start(tmp.path()));

    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while scanner.is_scanning() {
        assert!(std::time::Instant::now() < deadline, "worker stalled");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_counted_and_siblings_still_scanned() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write_bytes(&locked.join("hidden.bin"), 50);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permissions are not enforced for root; nothing to assert then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = Scanner::new().scan_directory(tmp.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(result.error_count >= 1);
    assert!(!result.is_scanning);
    assert_eq!(result.total_files, 4);
    assert_eq!(result.total_bytes, 1_000);
}

#[cfg(unix)]
#[test]
fn symlink_back_to_ancestor_terminates() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("alpha").join("loop")).unwrap();

    let result = Scanner::new().scan_directory(tmp.path());
    assert_eq!(result.total_files, 4);
    assert_eq!(result.total_bytes, 1_000);
}

/// `PROGRESS_CHANNEL_CAPACITY` must be a positive constant so it is never
/// accidentally set to 0 (which would make every `send()` a rendezvous).
const _: () = assert!(
    PROGRESS_CHANNEL_CAPACITY > 0,
    "PROGRESS_CHANNEL_CAPACITY must be > 0"
);
