//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod export;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_api_url, validate_args};
pub use export::{execute_export, export_path, validate_export_args};
pub use models::{AnalyzeArgs, EstimateSource, ExportArgs};
pub use utils::{display_schema, display_version, list_materials, list_vendors, validate_estimate_file};
