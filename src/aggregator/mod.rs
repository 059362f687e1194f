//! Aggregation of estimate records into display metrics.
//!
//! This module folds a validated estimate into:
//! - Monthly seasonal factor curves
//! - Ranked cost drivers
//! - Vendor groups in bill-of-quantities order
//! - Currency-formatted totals
//!
//! Every function here is pure and takes the record by shared reference.

pub mod drivers;
pub mod format;
pub mod seasonal;
pub mod vendors;

use crate::parser::schema::{EstimateRecord, VendorGroup};
use serde::{Deserialize, Serialize};

// Re-export main types and functions
pub use drivers::{compute_cost_drivers, significant_cost_drivers, top_cost_drivers, CostDriver};
pub use format::{format_currency, format_factor, month_label, summarize_costs, CostSummary};
pub use seasonal::{
    compute_material_curves, compute_seasonal_curve, MaterialCurve, SeasonalPoint, SeasonalTrend,
};
pub use vendors::compute_vendor_groups;

/// All derived views of one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub seasonal_curve: Vec<SeasonalPoint>,
    pub material_curves: Vec<MaterialCurve>,
    pub cost_drivers: Vec<CostDriver>,
    pub vendor_groups: Vec<VendorGroup>,
}

/// Compute every derived view of `record`
pub fn derive_metrics(record: &EstimateRecord) -> DerivedMetrics {
    DerivedMetrics {
        seasonal_curve: compute_seasonal_curve(record),
        material_curves: compute_material_curves(record),
        cost_drivers: compute_cost_drivers(record),
        vendor_groups: compute_vendor_groups(record),
    }
}
