use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Per-archive progress display, ticked once per classified document.
///
/// Clones share the same counter, so every classification task can hold
/// one. A hidden display still counts, which is what the summary reads.
#[derive(Clone)]
pub struct ArchiveProgress {
    bar: ProgressBar,
}

impl ArchiveProgress {
    /// Spinner drawn to stderr when `visible`, otherwise a silent counter
    pub fn new(input: &Path, visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} documents ({per_sec}) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(TICK_INTERVAL);
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(
            input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn document_classified(&self) {
        self.bar.inc(1);
    }

    pub fn classified(&self) -> u64 {
        self.bar.position()
    }

    /// Stop drawing and remove the spinner line
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
