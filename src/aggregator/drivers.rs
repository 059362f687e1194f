//! Rank line items by their contribution to total cost.
//!
//! Cost drivers are the bill-of-quantities lines that dominate the estimate.
//! These are the first places to look when the total needs to come down.

use crate::parser::schema::{EstimateRecord, LineItem};
use log::debug;
use serde::{Deserialize, Serialize};

/// A line item annotated with its share of total cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDriver {
    #[serde(flatten)]
    pub item: LineItem,

    /// Percentage of the estimate's total cost
    pub percentage: f64,
}

/// Rank all line items by total price
///
/// **Public** - main entry point for cost driver calculation
///
/// # Returns
/// Every line item, ordered by `total_price` descending. Items with equal
/// totals keep their bill-of-quantities order. `percentage` is
/// `total_price / total_cost * 100`, or 0 when the total cost is 0.
pub fn compute_cost_drivers(record: &EstimateRecord) -> Vec<CostDriver> {
    debug!("Ranking {} line items", record.line_items.len());

    let mut ranked: Vec<&LineItem> = record.line_items.iter().collect();

    // sort_by is stable, ties keep input order
    ranked.sort_by(|a, b| rank_key(b.total_price).total_cmp(&rank_key(a.total_price)));

    ranked
        .into_iter()
        .map(|item| create_cost_driver(item, record.total_cost))
        .collect()
}

/// Take the `top_n` largest drivers
///
/// **Public** - drivers must already be ranked by [`compute_cost_drivers`]
pub fn top_cost_drivers(drivers: &[CostDriver], top_n: usize) -> &[CostDriver] {
    &drivers[..top_n.min(drivers.len())]
}

/// Drivers whose share of total cost exceeds `threshold_percent`
///
/// **Public** - used for highlighting significant lines in summaries
pub fn significant_cost_drivers(
    drivers: &[CostDriver],
    threshold_percent: f64,
) -> impl Iterator<Item = &CostDriver> {
    drivers
        .iter()
        .filter(move |driver| driver.percentage > threshold_percent)
}

/// Create a CostDriver from a LineItem
///
/// **Private** - internal conversion
fn create_cost_driver(item: &LineItem, total_cost: f64) -> CostDriver {
    let percentage = if total_cost != 0.0 {
        (item.total_price / total_cost) * 100.0
    } else {
        0.0
    };

    CostDriver {
        item: item.clone(),
        percentage,
    }
}

/// Sort key that treats -0.0 and 0.0 as equal
fn rank_key(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
