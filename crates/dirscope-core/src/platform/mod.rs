/// Platform-specific functionality — link and reparse-point detection for
/// directory entries.

pub mod links;

pub use links::{classify, is_reparse_point, EntryKind};
