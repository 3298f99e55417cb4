use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use landmark_census::{
    application::{
        ports::{ArchiveStore, Classifier},
        use_cases::CensusRunner,
    },
    infrastructure::{classification::RoleAttributeClassifier, warc::FileArchiveStore},
    Config, ReportFormat,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_json);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        concurrency = config.concurrency,
        "Configuration loaded and validated"
    );

    let store: Arc<dyn ArchiveStore> = Arc::new(FileArchiveStore::new());
    let classifier: Arc<dyn Classifier> = Arc::new(RoleAttributeClassifier::new());
    let runner = CensusRunner::new(config.census_settings(), store, classifier);

    let report = runner.run().await.context("Census run failed")?;

    match config.report_format {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

/// Logs go to stderr so the report on stdout stays machine readable
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
