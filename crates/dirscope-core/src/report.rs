/// Renderings of a [`ScanResult`] for people and for other programs.
///
/// - [`render_text`] — stable plain-text summary, also suitable as textual
///   context for an external recommendation service.
/// - [`write_csv`] — the three ranked tables as flat CSV rows.
/// - [`to_json`] — the full serialised snapshot.
use crate::error::ReportError;
use crate::model::size::{format_count, format_size};
use crate::model::ScanResult;
use serde::Serialize;
use std::fmt::Write as _;
use std::io;

/// One CSV row; `section` is `file`, `folder` or `extension`.
#[derive(Serialize)]
struct CsvRow<'a> {
    section: &'a str,
    name: &'a str,
    path: &'a str,
    count: Option<u64>,
    size_bytes: u64,
}

fn status(result: &ScanResult) -> &'static str {
    if result.is_scanning {
        "scanning"
    } else if result.was_cancelled {
        "cancelled"
    } else {
        "complete"
    }
}

pub fn render_text(result: &ScanResult) -> String {
    let mut out = String::with_capacity(2_048);

    let _ = writeln!(out, "Scanned root: {}", result.scanned_root);
    let _ = writeln!(out, "Status:       {}", status(result));
    let _ = writeln!(
        out,
        "Files:        {} ({})",
        format_count(result.total_files),
        format_size(result.total_bytes)
    );
    let _ = writeln!(out, "Errors:       {}", format_count(result.error_count));
    let _ = writeln!(out, "Duration:     {}", result.scan_duration);

    if !result.top_files.is_empty() {
        let _ = writeln!(out, "\nLargest files");
        for (i, file) in result.top_files.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {:>10}  {}", i + 1, file.formatted_size(), file.path);
        }
    }

    if !result.top_folders.is_empty() {
        let _ = writeln!(out, "\nLargest folders");
        for (i, folder) in result.top_folders.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:>10}  {}  ({})",
                i + 1,
                folder.formatted_size(),
                folder.name,
                folder.path
            );
        }
    }

    if !result.file_types.is_empty() {
        let _ = writeln!(out, "\nFile types");
        for stat in &result.file_types {
            let _ = writeln!(
                out,
                "  .{:<10} {:<12} {:>8} files  {:>10}",
                stat.extension,
                stat.category.label(),
                format_count(stat.count),
                stat.formatted_size()
            );
        }
    }

    out
}

/// Write the ranked tables as CSV (`section,name,path,count,size_bytes`).
pub fn write_csv<W: io::Write>(result: &ScanResult, writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for file in &result.top_files {
        wtr.serialize(CsvRow {
            section: "file",
            name: &file.name,
            path: &file.path,
            count: None,
            size_bytes: file.size_bytes,
        })?;
    }
    for folder in &result.top_folders {
        wtr.serialize(CsvRow {
            section: "folder",
            name: &folder.name,
            path: &folder.path,
            count: None,
            size_bytes: folder.size_bytes,
        })?;
    }
    for stat in &result.file_types {
        wtr.serialize(CsvRow {
            section: "extension",
            name: &stat.extension,
            path: "",
            count: Some(stat.count),
            size_bytes: stat.size_bytes,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the full snapshot.
pub fn to_json(result: &ScanResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(result)?)
}
