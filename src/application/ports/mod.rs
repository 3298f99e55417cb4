mod archive_store;
mod classifier;

pub use archive_store::{ArchiveError, ArchiveStore, RecordReader, RecordWriter};
pub use classifier::Classifier;

#[cfg(test)]
pub use archive_store::{MockArchiveStore, MockRecordReader, MockRecordWriter};
#[cfg(test)]
pub use classifier::MockClassifier;
