use std::path::PathBuf;
use std::str::FromStr;

use crate::application::pipeline::{PipelineConfig, DEFAULT_CAPACITY, DEFAULT_READ_AHEAD};
use crate::application::use_cases::CensusSettings;

const MAX_CONCURRENCY: usize = 4096;
const MAX_READ_AHEAD: usize = 65_536;

/// How the final report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Classification tasks in flight per archive
    pub concurrency: usize,
    /// Records buffered between the reader thread and the dispatcher
    pub read_ahead: usize,
    pub report_format: ReportFormat,
    /// Emit log events as JSON lines
    pub log_json: bool,
    /// Draw a progress spinner per archive
    pub progress: bool,
    /// Set when `CENSUS_REPORT_FORMAT` could not be parsed
    report_format_error: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            concurrency: DEFAULT_CAPACITY,
            read_ahead: DEFAULT_READ_AHEAD,
            report_format: ReportFormat::Text,
            log_json: false,
            progress: true,
            report_format_error: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or unparsable numbers
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let (report_format, report_format_error) = match lookup("CENSUS_REPORT_FORMAT") {
            Some(value) => match value.parse() {
                Ok(format) => (format, None),
                Err(e) => (ReportFormat::default(), Some(e)),
            },
            None => (ReportFormat::default(), None),
        };

        Self {
            input_dir: lookup("CENSUS_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            output_dir: lookup("CENSUS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            concurrency: lookup("CENSUS_CONCURRENCY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.concurrency),
            read_ahead: lookup("CENSUS_READ_AHEAD")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.read_ahead),
            report_format,
            log_json: lookup("CENSUS_LOG_JSON")
                .map(|s| flag(&s))
                .unwrap_or(defaults.log_json),
            progress: lookup("CENSUS_PROGRESS")
                .map(|s| flag(&s))
                .unwrap_or(defaults.progress),
            report_format_error,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("CENSUS_INPUT_DIR cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("CENSUS_OUTPUT_DIR cannot be empty".to_string());
        }

        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(format!(
                "CENSUS_CONCURRENCY must be between 1 and {}",
                MAX_CONCURRENCY
            ));
        }
        if self.read_ahead == 0 || self.read_ahead > MAX_READ_AHEAD {
            return Err(format!(
                "CENSUS_READ_AHEAD must be between 1 and {}",
                MAX_READ_AHEAD
            ));
        }

        if let Some(e) = &self.report_format_error {
            return Err(format!("CENSUS_REPORT_FORMAT: {}", e));
        }

        Ok(())
    }

    pub fn census_settings(&self) -> CensusSettings {
        CensusSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            pipeline: PipelineConfig::new(self.concurrency, self.read_ahead)
                .with_progress(self.progress),
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes")
}
