//! Types for HTTP communication with the estimation engine.

use serde::Deserialize;
use std::fmt;

/// Document formats the engine can export an estimate as
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    /// File extension used in the export URL and default file name
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }

    /// Default file name for a downloaded export
    pub fn file_name(&self, estimate_id: &str) -> String {
        format!("estimate_{}.{}", estimate_id, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error body returned by the engine (`{"detail": ...}`)
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable detail message
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Raw estimate document (validated later by the parser)
///
/// We keep this as `serde_json::Value` so that every shape problem is
/// reported by the parser with a precise message.
pub type RawEstimate = serde_json::Value;
