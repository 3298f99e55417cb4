mod census_report;
mod run_census;

pub use census_report::{ArchiveFailure, CensusReport};
pub use run_census::{output_path_for, CensusRunner, CensusSettings};
