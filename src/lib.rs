//! # landmark_census - ARIA Landmark Census over Web Archives
//!
//! Batch tool that scans a directory of WARC files, finds HTML documents
//! declaring ARIA landmark roles, tallies landmark usage by category, and
//! copies every document with at least one landmark into a filtered output
//! archive per input.
//!
//! ## Architecture Layers
//!
//! - **Domain**: WARC records, landmark categories and sets
//! - **Application**: Ports, the per-archive pipeline and the census use case
//! - **Infrastructure**: WARC reader/writer, filesystem store, role classifier
//!
//! ## Pipeline
//!
//! Each archive is read sequentially by one blocking thread. HTML responses
//! are classified concurrently under a bounded limiter (150 tasks by
//! default); counts go into atomic counters and selected records are handed
//! to a single writer per output file.
//!
//! Records in an output archive appear in classification completion order,
//! which is not the order of the input archive.
//!
//! ## Example Usage
//!
//! ```no_run
//! use landmark_census::{
//!     application::use_cases::{CensusRunner, CensusSettings},
//!     infrastructure::{classification::RoleAttributeClassifier, warc::FileArchiveStore},
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = CensusRunner::new(
//!     CensusSettings::default(),
//!     Arc::new(FileArchiveStore::new()),
//!     Arc::new(RoleAttributeClassifier::new()),
//! );
//! let report = runner.run().await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{pipeline, ports, use_cases};
pub use config::{Config, ReportFormat};
pub use domain::{entities, value_objects};
