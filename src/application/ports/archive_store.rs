#[cfg(test)]
use mockall::automock;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::entities::WarcRecord;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid archive format: {0}")]
    InvalidFormat(String),

    #[error("Malformed record header: {0}")]
    MalformedHeader(String),

    #[error("Record truncated: expected {expected} content bytes")]
    Truncated { expected: u64 },
}

/// Port for sequential record access to one archive.
///
/// Archives are not safe for concurrent reads; a reader is owned by a
/// single thread for its whole lifetime.
#[cfg_attr(test, automock)]
pub trait RecordReader: Send {
    /// Read the next record, or `None` once the archive is exhausted
    fn next_record(&mut self) -> Result<Option<WarcRecord>, ArchiveError>;
}

/// Port for appending records to one output archive.
///
/// Implementations are not required to tolerate concurrent callers.
#[cfg_attr(test, automock)]
pub trait RecordWriter: Send {
    /// Append a record after every record written so far
    fn write_record(&mut self, record: &WarcRecord) -> Result<(), ArchiveError>;

    /// Flush buffered output; no records may be written afterwards
    fn finish(&mut self) -> Result<(), ArchiveError>;
}

/// Port for locating, opening and creating archives by path
#[cfg_attr(test, automock)]
pub trait ArchiveStore: Send + Sync {
    /// Every input archive under `root`, recursively, in lexical path order
    fn list_archives(&self, root: &Path) -> Result<Vec<PathBuf>, ArchiveError>;

    /// Create `path` and any missing parents; succeeds if it already exists
    fn ensure_directory(&self, path: &Path) -> Result<(), ArchiveError>;

    /// Open an existing archive for reading
    fn open_reader(&self, path: &Path) -> Result<Box<dyn RecordReader>, ArchiveError>;

    /// Create (or truncate) an archive for writing
    fn create_writer(&self, path: &Path) -> Result<Box<dyn RecordWriter>, ArchiveError>;
}
