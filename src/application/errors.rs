//! Error types for the archive pipeline and the run coordinator
//!
//! Failures are split by blast radius: `ArchiveJobError` aborts one archive
//! and the run moves on, `CensusRunError` aborts the whole run.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::pipeline::SinkError;
use crate::application::ports::ArchiveError;

/// Fatal for a single archive
#[derive(Debug, Error)]
pub enum ArchiveJobError {
    #[error("Failed to open input archive {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Failed to create output archive {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Failed to read archive {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Failed to write output archive {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: SinkError,
    },

    #[error("Worker for {} terminated abnormally: {reason}", .path.display())]
    WorkerPanicked { path: PathBuf, reason: String },
}

impl ArchiveJobError {
    /// Input archive the failure belongs to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ArchiveJobError::OpenInput { path, .. }
            | ArchiveJobError::CreateOutput { path, .. }
            | ArchiveJobError::Read { path, .. }
            | ArchiveJobError::Write { path, .. }
            | ArchiveJobError::WorkerPanicked { path, .. } => path,
        }
    }
}

/// Fatal for the whole run
#[derive(Debug, Error)]
pub enum CensusRunError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateOutputRoot {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },

    #[error("Failed to scan input directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },
}
