/// Scan progress reporting — snapshot events sent from the scan thread to
/// the consumer via a crossbeam channel.
///
/// Per scan, the consumer sees zero or more [`ScanEvent::Progress`] events
/// with strictly increasing `total_files`, followed by exactly one
/// [`ScanEvent::Finished`].
use crate::model::ScanResult;

#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Interim snapshot (`is_scanning == true`).
    Progress(ScanResult),
    /// Terminal snapshot (`is_scanning == false`), complete or cancelled.
    Finished(ScanResult),
}

impl ScanEvent {
    pub fn snapshot(&self) -> &ScanResult {
        match self {
            Self::Progress(result) | Self::Finished(result) => result,
        }
    }

    pub fn into_snapshot(self) -> ScanResult {
        match self {
            Self::Progress(result) | Self::Finished(result) => result,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
