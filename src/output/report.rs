//! Report schema written to disk.
//!
//! A report bundles an estimate's derived metrics with its formatted totals.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{derive_metrics, summarize_costs, CostSummary, DerivedMetrics};
use crate::parser::schema::{ConfidenceBands, EstimateRecord};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Schema version for compatibility checking
    pub version: String,

    pub estimate_id: String,

    pub confidence_bands: ConfidenceBands,

    /// Formatted total and confidence bands
    pub cost_summary: CostSummary,

    /// Seasonal curves, cost drivers and vendor groups
    pub metrics: DerivedMetrics,

    pub assumptions: Vec<String>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Build a report from a validated record
///
/// **Public** - used by commands to create final output
pub fn to_report(record: &EstimateRecord) -> EstimateReport {
    EstimateReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        estimate_id: record.id.clone(),
        confidence_bands: record.confidence_bands,
        cost_summary: summarize_costs(record),
        metrics: derive_metrics(record),
        assumptions: record.assumptions.clone(),
        generated_at: Utc::now().to_rfc3339(),
    }
}
