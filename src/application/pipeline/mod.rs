//! Concurrent per-archive classification pipeline

mod config;
mod limiter;
mod processor;
mod progress;
mod results;
mod sink;
mod tally;

pub use config::{PipelineConfig, DEFAULT_READ_AHEAD};
pub use limiter::{ConcurrencyLimiter, LimiterError, LimiterReport, TaskFailure, DEFAULT_CAPACITY};
pub use processor::{ArchiveJob, ArchiveProcessor};
pub use progress::ArchiveProgress;
pub use results::ArchiveSummary;
pub use sink::{OutputSink, QueueClosed, RecordQueue, SinkError};
pub use tally::{LandmarkTally, TallySnapshot};
