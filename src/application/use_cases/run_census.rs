use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::errors::CensusRunError;
use crate::application::pipeline::{ArchiveJob, ArchiveProcessor, LandmarkTally, PipelineConfig};
use crate::application::ports::{ArchiveStore, Classifier};

use super::census_report::CensusReport;

/// Where a census reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pipeline: PipelineConfig,
}

impl Default for CensusSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Output archive for `input`: its base name without a trailing `.gz`,
/// placed directly in `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    output_dir.join(name)
}

/// Use case for a full census over every archive in the input directory.
///
/// Archives are processed one at a time in lexical path order. A failing
/// archive is logged and listed in the report; the run carries on with the
/// next one. Only a failure to prepare the run itself is returned as an error.
pub struct CensusRunner {
    settings: CensusSettings,
    store: Arc<dyn ArchiveStore>,
    processor: ArchiveProcessor,
}

impl CensusRunner {
    pub fn new(
        settings: CensusSettings,
        store: Arc<dyn ArchiveStore>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        let processor = ArchiveProcessor::new(Arc::clone(&store), classifier, settings.pipeline);
        Self {
            settings,
            store,
            processor,
        }
    }

    pub fn settings(&self) -> &CensusSettings {
        &self.settings
    }

    pub async fn run(&self) -> Result<CensusReport, CensusRunError> {
        self.validate()?;

        let output_dir = &self.settings.output_dir;
        self.store
            .ensure_directory(output_dir)
            .map_err(|source| CensusRunError::CreateOutputRoot {
                path: output_dir.clone(),
                source,
            })?;

        let input_dir = &self.settings.input_dir;
        let inputs = self
            .store
            .list_archives(input_dir)
            .map_err(|source| CensusRunError::Discovery {
                path: input_dir.clone(),
                source,
            })?;
        info!(
            input_dir = %input_dir.display(),
            output_dir = %output_dir.display(),
            archives = inputs.len(),
            "Starting census"
        );

        let jobs = self.plan_jobs(inputs);
        let totals = LandmarkTally::new();
        let mut report = CensusReport::new();

        for job in jobs {
            match self.processor.process(&job).await {
                Ok(summary) => {
                    totals.absorb(&summary.landmarks);
                    report.add_archive(summary);
                }
                Err(e) => {
                    error!(input = %job.input.display(), error = %e, "Archive failed");
                    report.add_failure(job.input.clone(), &e);
                }
            }
        }
        report.set_landmarks(totals.snapshot());

        info!(
            archives = report.archives_processed(),
            failed = report.failures.len(),
            documents = report.documents,
            documents_with_landmarks = report.documents_with_landmarks,
            "Census complete"
        );
        Ok(report)
    }

    fn validate(&self) -> Result<(), CensusRunError> {
        let pipeline = &self.settings.pipeline;
        if pipeline.concurrency == 0 {
            return Err(CensusRunError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if pipeline.read_ahead == 0 {
            return Err(CensusRunError::InvalidConfig(
                "read-ahead must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Pair every input with its output path, warning about inputs that
    /// share an output name. The later archive overwrites the earlier one.
    fn plan_jobs(&self, inputs: Vec<PathBuf>) -> Vec<ArchiveJob> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        inputs
            .into_iter()
            .map(|input| {
                let output = output_path_for(&input, &self.settings.output_dir);
                if let Some(previous) = claimed.insert(output.clone(), input.clone()) {
                    warn!(
                        output = %output.display(),
                        first = %previous.display(),
                        second = %input.display(),
                        "Two archives map to the same output file"
                    );
                }
                ArchiveJob::new(input, output)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ArchiveError, MockArchiveStore, MockClassifier, MockRecordReader, MockRecordWriter,
        RecordReader, RecordWriter,
    };
    use crate::domain::entities::{
        RecordHeaders, WarcRecord, CONTENT_TYPE, HTML_PAYLOAD_TYPE, HTTP_RESPONSE_CONTENT_TYPE,
        IDENTIFIED_PAYLOAD_TYPE, RECORD_ID,
    };
    use crate::domain::value_objects::{LandmarkCategory, LandmarkSet};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn html(id: &str, body: &str) -> WarcRecord {
        let headers: RecordHeaders = [
            (RECORD_ID, id),
            (CONTENT_TYPE, HTTP_RESPONSE_CONTENT_TYPE),
            (IDENTIFIED_PAYLOAD_TYPE, HTML_PAYLOAD_TYPE),
        ]
        .into_iter()
        .collect();
        WarcRecord::new("WARC/1.0", headers, body.to_string())
    }

    fn reader_over(records: Vec<WarcRecord>) -> Box<dyn RecordReader> {
        let records = Mutex::new(records.into_iter().collect::<VecDeque<_>>());
        let mut reader = MockRecordReader::new();
        reader
            .expect_next_record()
            .returning(move || Ok(records.lock().unwrap().pop_front()));
        Box::new(reader)
    }

    fn null_writer() -> Box<dyn RecordWriter> {
        let mut writer = MockRecordWriter::new();
        writer.expect_write_record().returning(|_| Ok(()));
        writer.expect_finish().returning(|| Ok(()));
        Box::new(writer)
    }

    fn main_classifier() -> MockClassifier {
        let mut classifier = MockClassifier::new();
        classifier.expect_classify().returning(|content| {
            if content.windows(4).any(|w| w == b"main") {
                [LandmarkCategory::Main].into_iter().collect()
            } else {
                LandmarkSet::new()
            }
        });
        classifier
    }

    fn settings() -> CensusSettings {
        CensusSettings {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("out"),
            pipeline: PipelineConfig::new(4, 4),
        }
    }

    #[test]
    fn test_output_path_strips_gz_and_directories() {
        assert_eq!(
            output_path_for(Path::new("data/2023/a/CC-MAIN-1.warc.gz"), Path::new("output")),
            PathBuf::from("output/CC-MAIN-1.warc")
        );
        assert_eq!(
            output_path_for(Path::new("data/plain.warc"), Path::new("output")),
            PathBuf::from("output/plain.warc")
        );
    }

    #[tokio::test]
    async fn test_failed_archive_does_not_abort_run() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().times(1).returning(|_| Ok(()));
        store.expect_list_archives().times(1).returning(|_| {
            Ok(vec![
                PathBuf::from("data/a.warc.gz"),
                PathBuf::from("data/bad.warc.gz"),
                PathBuf::from("data/c.warc.gz"),
            ])
        });
        store.expect_open_reader().returning(|path| {
            if path.ends_with("bad.warc.gz") {
                return Err(ArchiveError::InvalidFormat("not a WARC file".to_string()));
            }
            Ok(reader_over(vec![
                html("1", "<div role=\"main\">"),
                html("2", "<p>"),
            ]))
        });
        store
            .expect_create_writer()
            .times(2)
            .returning(|_| Ok(null_writer()));

        let runner = CensusRunner::new(settings(), Arc::new(store), Arc::new(main_classifier()));
        let report = runner.run().await.unwrap();

        assert_eq!(report.archives_processed(), 2);
        assert_eq!(report.documents, 4);
        assert_eq!(report.documents_with_landmarks, 2);
        assert_eq!(report.count(LandmarkCategory::Main), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].input, PathBuf::from("data/bad.warc.gz"));
        assert!(report.failures[0].error.contains("not a WARC file"));
    }

    #[tokio::test]
    async fn test_totals_exclude_archives_that_fail_midway() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().returning(|_| Ok(()));
        store
            .expect_list_archives()
            .returning(|_| Ok(vec![PathBuf::from("data/a.warc.gz"), PathBuf::from("data/b.warc.gz")]));
        store.expect_open_reader().returning(|path| {
            if path.ends_with("b.warc.gz") {
                let mut reader = MockRecordReader::new();
                let mut sent = false;
                reader.expect_next_record().returning(move || {
                    if sent {
                        Err(ArchiveError::Truncated { expected: 100 })
                    } else {
                        sent = true;
                        Ok(Some(html("b1", "main")))
                    }
                });
                return Ok(Box::new(reader) as Box<dyn RecordReader>);
            }
            Ok(reader_over(vec![html("a1", "main")]))
        });
        store.expect_create_writer().returning(|_| Ok(null_writer()));

        let runner = CensusRunner::new(settings(), Arc::new(store), Arc::new(main_classifier()));
        let report = runner.run().await.unwrap();

        assert_eq!(report.documents, 1);
        assert_eq!(report.count(LandmarkCategory::Main), 1);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_output_root_failure_is_fatal() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().returning(|_| {
            Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        });
        store.expect_list_archives().never();

        let runner = CensusRunner::new(settings(), Arc::new(store), Arc::new(main_classifier()));
        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, CensusRunError::CreateOutputRoot { .. }));
    }

    #[tokio::test]
    async fn test_missing_input_directory_is_fatal() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().returning(|_| Ok(()));
        store.expect_list_archives().returning(|_| {
            Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such directory",
            )))
        });

        let runner = CensusRunner::new(settings(), Arc::new(store), Arc::new(main_classifier()));
        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, CensusRunError::Discovery { .. }));
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_rejected() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().never();

        let mut settings = settings();
        settings.pipeline.concurrency = 0;
        let runner = CensusRunner::new(settings, Arc::new(store), Arc::new(main_classifier()));

        assert!(matches!(
            runner.run().await,
            Err(CensusRunError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_input_directory_reports_zero() {
        let mut store = MockArchiveStore::new();
        store.expect_ensure_directory().returning(|_| Ok(()));
        store.expect_list_archives().returning(|_| Ok(Vec::new()));

        let runner = CensusRunner::new(settings(), Arc::new(store), Arc::new(main_classifier()));
        let report = runner.run().await.unwrap();

        assert_eq!(report.documents, 0);
        assert_eq!(report.archives_processed(), 0);
        assert!(report.is_success());
    }
}
