/// File type classification based on file extensions.
///
/// Extensions are normalised into bucket keys (lower-cased, no dot,
/// `"none"` when absent) and mapped onto broad categories (Documents,
/// Media, Code, Archives, System, Other) for display.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bucket key used for files without an extension.
pub const NO_EXTENSION: &str = "none";

/// Broad file type categories for visual grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Documents,
    Images,
    Video,
    Audio,
    Archives,
    Code,
    Executables,
    System,
    Other,
}

impl FileCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Images => "Images",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Archives => "Archives",
            Self::Code => "Code",
            Self::Executables => "Executables",
            Self::System => "System",
            Self::Other => "Other",
        }
    }
}

/// Derive the extension bucket key for a file name.
///
/// `"Report.PDF"` → `"pdf"`, `"archive.tar.gz"` → `"gz"`. Names with no
/// extension, a trailing dot, or only a leading dot (`".bashrc"`) map to
/// [`NO_EXTENSION`].
pub fn normalise_extension(file_name: &str) -> CompactString {
    match Path::new(file_name).extension() {
        Some(ext) if !ext.is_empty() => {
            let ext = ext.to_string_lossy();
            let mut key = CompactString::with_capacity(ext.len());
            for ch in ext.chars() {
                key.extend(ch.to_lowercase());
            }
            key
        }
        _ => CompactString::new(NO_EXTENSION),
    }
}

/// Categorise a file extension into a broad category.
///
/// Zero-heap-allocation hot path: extensions are lowercased into a fixed-size
/// stack buffer (`[u8; 16]`) rather than allocating a `String`.  File
/// extensions longer than 16 bytes are treated as `Other`.
pub fn categorise_extension(ext: &str) -> FileCategory {
    let bytes = ext.as_bytes();
    if bytes.len() > 16 {
        return FileCategory::Other;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return FileCategory::Other,
    };

    match lower_str {
        "doc" | "docx" | "pdf" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "ppt" | "pptx"
        | "csv" | "md" | "epub" => FileCategory::Documents,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" | "tiff" | "tif"
        | "psd" | "raw" | "cr2" | "nef" | "heic" | "heif" => FileCategory::Images,
        "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpg" | "mpeg" | "3gp" => {
            FileCategory::Video
        }
        "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" | "opus" => FileCategory::Audio,
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" | "zst" | "cab" | "iso" | "dmg" => {
            FileCategory::Archives
        }
        "rs" | "py" | "js" | "ts" | "jsx" | "tsx" | "c" | "cpp" | "h" | "hpp" | "cs" | "java"
        | "go" | "rb" | "php" | "swift" | "kt" | "scala" | "html" | "css" | "scss" | "json"
        | "xml" | "yaml" | "yml" | "toml" | "sql" | "sh" | "bat" | "ps1" => FileCategory::Code,
        "exe" | "msi" | "dll" | "so" | "dylib" | "app" | "com" | "scr" => FileCategory::Executables,
        "sys" | "drv" | "inf" | "cat" | "log" | "etl" | "dat" | "reg" | "tmp" | "bak" => {
            FileCategory::System
        }
        _ => FileCategory::Other,
    }
}
