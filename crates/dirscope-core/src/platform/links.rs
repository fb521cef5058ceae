/// Classification of directory entries, including link detection.
///
/// Links are never followed during traversal. A symbolic link (or, on
/// Windows, any reparse point such as a junction) that resolves to a
/// directory is reported as [`EntryKind::LinkedDirectory`] and skipped by
/// the scanner, which guarantees termination on cyclic links. Links to files
/// and broken links are plain files sized by the link entry itself, so a
/// target is never counted twice.
use std::fs::{self, DirEntry, Metadata};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular (or special) file with its logical size.
    File { size: u64 },
    /// A real directory to descend into.
    Directory,
    /// A link or reparse point resolving to a directory — never enqueued.
    LinkedDirectory,
}

/// Classify one entry yielded by `read_dir`.
///
/// Uses the entry's own metadata (no link traversal); only link entries pay
/// for an extra `stat` of their target.
pub fn classify(entry: &DirEntry) -> io::Result<EntryKind> {
    let meta = entry.metadata()?;
    if meta.file_type().is_symlink() || is_reparse_point(&meta) {
        return Ok(match fs::metadata(entry.path()) {
            Ok(target) if target.is_dir() => EntryKind::LinkedDirectory,
            _ => EntryKind::File { size: meta.len() },
        });
    }
    if meta.is_dir() {
        Ok(EntryKind::Directory)
    } else {
        Ok(EntryKind::File { size: meta.len() })
    }
}

/// `true` if the entry carries `FILE_ATTRIBUTE_REPARSE_POINT`.
#[cfg(windows)]
pub fn is_reparse_point(meta: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x400;
    meta.file_attributes() & FILE_ATTRIBUTE_REPARSE_POINT != 0
}

#[cfg(not(windows))]
pub fn is_reparse_point(_meta: &Metadata) -> bool {
    false
}
