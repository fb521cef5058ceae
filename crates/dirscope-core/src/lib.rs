/// DirScope Core — directory-tree storage scanning and aggregation.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI,
/// services that consume scan snapshots).
///
/// # Modules
///
/// - [`model`] — Immutable snapshot types (`ScanResult`, `FileRecord`, …).
/// - [`scanner`] — Background breadth-first scanning with progress snapshots
///   and cooperative cancellation.
/// - [`analysis`] — Folder-weight / extension aggregation and ranking.
/// - [`platform`] — Link and reparse-point detection.
/// - [`report`] — Text, CSV and JSON renderings of a snapshot.
/// - [`error`] — Typed errors.
pub mod analysis;
pub mod error;
pub mod model;
pub mod platform;
pub mod report;
pub mod scanner;

pub use error::{ReportError, ScanError};
pub use model::{ExtensionStat, FileRecord, FolderEntry, ScanResult};
pub use scanner::progress::ScanEvent;
pub use scanner::{ScanHandle, Scanner};
