//! Output writers for estimate reports and exports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - Downloaded PDF/CSV exports
//! - Text summaries

pub mod export;
pub mod json;
pub mod report;
pub mod summary;

// Re-export main functions
pub use export::write_export;
pub use json::{read_estimate, read_report, write_report};
pub use report::{to_report, EstimateReport};
pub use summary::render_summary;
