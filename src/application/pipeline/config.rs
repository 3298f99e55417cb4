use super::limiter::DEFAULT_CAPACITY;

/// Default number of records buffered between the reader thread and the dispatcher
pub const DEFAULT_READ_AHEAD: usize = 256;

/// Tuning for one archive pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum classification tasks in flight
    pub concurrency: usize,
    /// Records buffered ahead of the dispatcher
    pub read_ahead: usize,
    /// Draw a per-archive progress spinner on stderr
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CAPACITY,
            read_ahead: DEFAULT_READ_AHEAD,
            show_progress: false,
        }
    }
}

impl PipelineConfig {
    pub fn new(concurrency: usize, read_ahead: usize) -> Self {
        Self {
            concurrency,
            read_ahead,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
