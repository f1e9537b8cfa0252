//! Run report generation and result packaging.

pub mod entities;
pub mod package;
pub mod report;

pub use entities::{decode_output_entities, decode_twice};
pub use package::{PackageSummary, count_output_files, package_results, top_level_files};
pub use report::{REPORT_FILE_NAME, RunReport, write_run_report};
