use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::application::pipeline::{ArchiveSummary, TallySnapshot};
use crate::domain::value_objects::LandmarkCategory;

/// An archive that was abandoned, with the reason
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArchiveFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Result of a whole census run
///
/// Totals cover successful archives only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CensusReport {
    /// HTML documents examined across all successful archives
    pub documents: u64,
    pub documents_with_landmarks: u64,
    pub landmarks: TallySnapshot,
    pub archives: Vec<ArchiveSummary>,
    pub failures: Vec<ArchiveFailure>,
}

impl CensusReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful archive and add its documents to the total
    pub fn add_archive(&mut self, summary: ArchiveSummary) {
        self.documents += summary.documents_examined;
        self.archives.push(summary);
    }

    /// Set the run-wide landmark totals
    pub fn set_landmarks(&mut self, landmarks: TallySnapshot) {
        self.documents_with_landmarks = landmarks.documents_with_landmarks();
        self.landmarks = landmarks;
    }

    pub fn add_failure(&mut self, input: PathBuf, error: impl fmt::Display) {
        self.failures.push(ArchiveFailure {
            input,
            error: error.to_string(),
        });
    }

    pub fn archives_processed(&self) -> usize {
        self.archives.len()
    }

    pub fn count(&self, category: LandmarkCategory) -> u64 {
        self.landmarks.count(category)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CensusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of documents: {}", self.documents)?;
        writeln!(
            f,
            "Total number of documents with landmarks: {}",
            self.documents_with_landmarks
        )?;
        writeln!(f, "Landmark counts:")?;
        writeln!(f)?;
        for (category, count) in self.landmarks.iter() {
            writeln!(f, "{}: {}", category.label(), count)?;
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed archives: {}", self.failures.len())?;
            for failure in &self.failures {
                writeln!(f, "  {}: {}", failure.input.display(), failure.error)?;
            }
        }
        Ok(())
    }
}
