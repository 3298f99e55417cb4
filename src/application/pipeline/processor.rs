use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::application::errors::ArchiveJobError;
use crate::application::pipeline::config::PipelineConfig;
use crate::application::pipeline::limiter::{ConcurrencyLimiter, LimiterError};
use crate::application::pipeline::progress::ArchiveProgress;
use crate::application::pipeline::results::ArchiveSummary;
use crate::application::pipeline::sink::{OutputSink, QueueClosed, RecordQueue};
use crate::application::pipeline::tally::LandmarkTally;
use crate::application::ports::{ArchiveError, ArchiveStore, Classifier, RecordReader};
use crate::domain::entities::WarcRecord;

/// One input archive and the output archive it is filtered into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ArchiveJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Runs the classification pipeline over a single archive.
///
/// Each call to [`process`](Self::process) moves through four phases:
///
/// - **Opening**: open the input reader and create the output sink
/// - **Streaming**: one blocking thread reads records in order and hands
///   them over a bounded channel; HTML responses are dispatched to the
///   limiter, everything else is skipped
/// - **Draining**: wait for every dispatched task, then close the queue
/// - **Closed**: wait for the sink to flush and report the outcome
///
/// A read error ends streaming early but is only returned once the pipeline
/// has fully drained, so no task outlives the call.
///
/// # Examples
///
/// ```rust,ignore
/// let processor = ArchiveProcessor::new(store, classifier, PipelineConfig::default());
/// let job = ArchiveJob::new("data/a.warc.gz", "output/a.warc");
/// let summary = processor.process(&job).await?;
/// println!("{} documents with landmarks", summary.documents_with_landmarks());
/// ```
pub struct ArchiveProcessor {
    store: Arc<dyn ArchiveStore>,
    classifier: Arc<dyn Classifier>,
    config: PipelineConfig,
}

impl ArchiveProcessor {
    pub fn new(
        store: Arc<dyn ArchiveStore>,
        classifier: Arc<dyn Classifier>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            classifier,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn process(&self, job: &ArchiveJob) -> Result<ArchiveSummary, ArchiveJobError> {
        let reader =
            self.store
                .open_reader(&job.input)
                .map_err(|source| ArchiveJobError::OpenInput {
                    path: job.input.clone(),
                    source,
                })?;
        let sink = OutputSink::create(self.store.as_ref(), &job.output).map_err(|source| {
            ArchiveJobError::CreateOutput {
                path: job.output.clone(),
                source,
            }
        })?;
        info!(
            input = %job.input.display(),
            output = %job.output.display(),
            concurrency = self.config.concurrency,
            "Processing archive"
        );

        let (sender, mut records) = mpsc::channel(self.config.read_ahead.max(1));
        let reader_thread = tokio::task::spawn_blocking(move || stream_records(reader, sender));

        let tally = Arc::new(LandmarkTally::new());
        let progress = ArchiveProgress::new(&job.input, self.config.show_progress);
        let queue = sink.queue();
        let mut limiter = ConcurrencyLimiter::new(self.config.concurrency);
        let mut documents_examined = 0u64;
        let mut dispatch_error: Option<LimiterError> = None;

        while let Some(record) = records.recv().await {
            if !record.is_html_response() {
                trace!(record_id = record.record_id().unwrap_or("-"), "Skipping non-HTML record");
                continue;
            }
            documents_examined += 1;

            let classifier = Arc::clone(&self.classifier);
            let tally = Arc::clone(&tally);
            let queue = queue.clone();
            let progress = progress.clone();
            let dispatched = limiter
                .execute(move || {
                    classify_and_route(classifier.as_ref(), &tally, &queue, &progress, record)
                })
                .await;
            if let Err(e) = dispatched {
                dispatch_error = Some(e);
                break;
            }
        }

        let report = limiter.wait().await;
        progress.finish();
        drop(queue);
        // Unblocks the reader if dispatch stopped before end of archive
        drop(records);

        let read_result = reader_thread.await;
        let write_result = sink.close().await;

        let records_read = match read_result {
            Ok(Ok(count)) => count,
            Ok(Err(source)) => {
                return Err(ArchiveJobError::Read {
                    path: job.input.clone(),
                    source,
                })
            }
            Err(e) => {
                return Err(ArchiveJobError::WorkerPanicked {
                    path: job.input.clone(),
                    reason: e.to_string(),
                })
            }
        };
        if let Some(e) = dispatch_error {
            return Err(ArchiveJobError::WorkerPanicked {
                path: job.input.clone(),
                reason: e.to_string(),
            });
        }
        let records_written = write_result.map_err(|source| ArchiveJobError::Write {
            path: job.output.clone(),
            source,
        })?;

        let summary = ArchiveSummary {
            input: job.input.clone(),
            output: job.output.clone(),
            records_read,
            documents_examined,
            documents_classified: progress.classified(),
            records_written,
            failed_tasks: report.failures.len(),
            landmarks: tally.snapshot(),
        };
        if !summary.is_complete() {
            warn!(
                input = %job.input.display(),
                failed_tasks = summary.failed_tasks,
                selected = summary.documents_with_landmarks(),
                written = summary.records_written,
                "Archive finished with missing output records"
            );
        }
        info!(
            input = %job.input.display(),
            records_read,
            documents_examined,
            documents_classified = summary.documents_classified,
            documents_with_landmarks = summary.documents_with_landmarks(),
            records_written,
            "Archive processed"
        );
        Ok(summary)
    }
}

/// Reader thread body. Stops early if the dispatcher hangs up.
fn stream_records(
    mut reader: Box<dyn RecordReader>,
    records: mpsc::Sender<WarcRecord>,
) -> Result<u64, ArchiveError> {
    let mut read = 0u64;
    while let Some(record) = reader.next_record()? {
        read += 1;
        if records.blocking_send(record).is_err() {
            debug!(read, "Dispatcher stopped, reader exiting early");
            break;
        }
    }
    Ok(read)
}

fn classify_and_route(
    classifier: &dyn Classifier,
    tally: &LandmarkTally,
    queue: &RecordQueue,
    progress: &ArchiveProgress,
    record: WarcRecord,
) {
    let landmarks = classifier.classify(record.content());
    progress.document_classified();
    if !tally.record(&landmarks) {
        return;
    }

    if let Err(QueueClosed(record)) = queue.enqueue(record) {
        warn!(
            record_id = record.record_id().unwrap_or("-"),
            "Output sink stopped, record dropped"
        );
    }
}
