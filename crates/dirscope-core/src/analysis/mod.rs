/// Analysis modules — aggregation of visited files and ranking into
/// snapshots.

pub mod accumulator;
pub mod file_types;
pub mod ranker;
pub mod top_files;

pub use accumulator::{ancestor_chain, ExtensionBucket, ScanState};
pub use file_types::{categorise_extension, normalise_extension, FileCategory, NO_EXTENSION};
pub use ranker::snapshot;
pub use top_files::TopFiles;

/// Largest files kept in every snapshot.
pub const TOP_FILES_LIMIT: usize = 20;

/// Heaviest folders kept in every snapshot.
pub const TOP_FOLDERS_LIMIT: usize = 10;

/// Extension buckets kept in every snapshot.
pub const TOP_EXTENSIONS_LIMIT: usize = 10;
