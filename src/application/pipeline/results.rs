use serde::Serialize;
use std::path::PathBuf;

use super::tally::TallySnapshot;

/// Result of processing one archive to completion
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Every record read, eligible or not
    pub records_read: u64,
    /// HTML response records dispatched for classification
    pub documents_examined: u64,
    /// Classification tasks that ran to completion
    pub documents_classified: u64,
    /// Records written to the output archive
    pub records_written: u64,
    /// Classification tasks that panicked
    pub failed_tasks: usize,
    /// Landmark counts contributed by this archive alone
    pub landmarks: TallySnapshot,
}

impl ArchiveSummary {
    pub fn documents_with_landmarks(&self) -> u64 {
        self.landmarks.documents_with_landmarks()
    }

    /// True when every selected document reached the output archive
    pub fn is_complete(&self) -> bool {
        self.failed_tasks == 0 && self.records_written == self.documents_with_landmarks()
    }
}
