use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ports::{ArchiveError, ArchiveStore, RecordWriter};
use crate::domain::entities::WarcRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Output writer failed: {0}")]
    Write(#[from] ArchiveError),

    #[error("Output writer terminated abnormally: {0}")]
    Aborted(String),
}

/// The consumer has stopped and the record was not queued
#[derive(Debug, Error)]
#[error("Output queue is closed")]
pub struct QueueClosed(pub WarcRecord);

/// Producer handle for one job's output queue.
///
/// Unbounded FIFO; cloning yields another producer for the same queue. The
/// queue closes once every producer has been dropped.
#[derive(Clone)]
pub struct RecordQueue {
    sender: mpsc::UnboundedSender<WarcRecord>,
}

impl RecordQueue {
    /// Hand a record to the sink. Ownership moves to the sink on success.
    pub fn enqueue(&self, record: WarcRecord) -> Result<(), QueueClosed> {
        self.sender
            .send(record)
            .map_err(|mpsc::error::SendError(record)| QueueClosed(record))
    }
}

/// Single writer for one output archive.
///
/// The destination is created when the sink is constructed. A dedicated
/// blocking thread then owns the writer exclusively and appends queued
/// records in the order it receives them. Producers run concurrently, so the
/// output order follows classification completion order, not input order.
pub struct OutputSink {
    path: PathBuf,
    queue: RecordQueue,
    consumer: JoinHandle<Result<u64, ArchiveError>>,
}

impl OutputSink {
    /// Create the output archive and start the consumer thread
    pub fn create(store: &dyn ArchiveStore, path: &Path) -> Result<Self, ArchiveError> {
        let writer = store.create_writer(path)?;
        let (sender, receiver) = mpsc::unbounded_channel();

        let consumer = tokio::task::spawn_blocking(move || drain(writer, receiver));
        debug!(path = %path.display(), "Output sink started");

        Ok(Self {
            path: path.to_path_buf(),
            queue: RecordQueue { sender },
            consumer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Another producer for this sink's queue
    pub fn queue(&self) -> RecordQueue {
        self.queue.clone()
    }

    /// Close the sink's own producer, wait for the queue to drain and the
    /// file to be finished. Returns the number of records written.
    ///
    /// Must only be called once no other producer can still enqueue.
    pub async fn close(self) -> Result<u64, SinkError> {
        let OutputSink {
            path,
            queue,
            consumer,
        } = self;
        drop(queue);

        let written = consumer
            .await
            .map_err(|e| SinkError::Aborted(e.to_string()))??;
        debug!(path = %path.display(), written, "Output sink closed");
        Ok(written)
    }
}

fn drain(
    mut writer: Box<dyn RecordWriter>,
    mut receiver: mpsc::UnboundedReceiver<WarcRecord>,
) -> Result<u64, ArchiveError> {
    let mut written = 0u64;
    while let Some(record) = receiver.blocking_recv() {
        if let Err(e) = writer.write_record(&record) {
            warn!(
                record_id = record.record_id().unwrap_or("-"),
                error = %e,
                "Failed to write record, stopping output sink"
            );
            return Err(e);
        }
        written += 1;
    }
    writer.finish()?;
    Ok(written)
}
