/// Data model for DirScope scan results.
///
/// Everything here is plain, immutable data that can be serialised and
/// handed across threads.
pub mod file_record;
pub mod scan_result;
pub mod size;

pub use file_record::FileRecord;
pub use scan_result::{ExtensionStat, FolderEntry, ScanResult};
