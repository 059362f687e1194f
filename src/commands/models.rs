use crate::parser::EstimateRequest;
use crate::rpc::ExportFormat;
use crate::utils::config::{DEFAULT_API_URL, DEFAULT_TOP_DRIVERS};
use std::path::PathBuf;

/// Where the estimate to analyze comes from
#[derive(Debug, Clone)]
pub enum EstimateSource {
    /// Estimate JSON saved on disk
    File(PathBuf),

    /// Estimate already stored by the engine
    Saved { api_url: String, estimate_id: String },

    /// New estimate requested from the engine
    Run {
        api_url: String,
        request: EstimateRequest,
    },
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    pub source: EstimateSource,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Number of cost drivers shown in the summary
    pub top_drivers: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            source: EstimateSource::File(PathBuf::from("estimate.json")),
            output_json: None,
            top_drivers: DEFAULT_TOP_DRIVERS,
            print_summary: false,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub api_url: String,
    pub estimate_id: String,
    pub format: ExportFormat,

    /// Output path; defaults to `estimate_<id>.<ext>`
    pub output: Option<PathBuf>,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            estimate_id: String::new(),
            format: ExportFormat::Pdf,
            output: None,
        }
    }
}
