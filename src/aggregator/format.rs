//! Currency and factor formatting for display.

use crate::parser::schema::{ConfidenceBands, EstimateRecord};
use crate::utils::config::{CURRENCY_SYMBOL, MONTH_LABELS};
use serde::{Deserialize, Serialize};

/// A labelled, formatted confidence band value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    pub label: String,
    pub amount: f64,
    pub formatted: String,
}

/// Display-ready totals for an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_cost: f64,
    pub formatted_total: String,

    /// P25
    pub optimistic: BandSummary,

    /// P50
    pub most_likely: BandSummary,

    /// P75
    pub conservative: BandSummary,
}

impl CostSummary {
    /// Bands from lowest to highest percentile
    pub fn bands(&self) -> [&BandSummary; 3] {
        [&self.optimistic, &self.most_likely, &self.conservative]
    }
}

/// Format the estimate's totals for display
pub fn summarize_costs(record: &EstimateRecord) -> CostSummary {
    let ConfidenceBands { p25, p50, p75 } = record.confidence_bands;

    CostSummary {
        total_cost: record.total_cost,
        formatted_total: format_currency(record.total_cost),
        optimistic: band("Optimistic (P25)", p25),
        most_likely: band("Most Likely (P50)", p50),
        conservative: band("Conservative (P75)", p75),
    }
}

fn band(label: &str, amount: f64) -> BandSummary {
    BandSummary {
        label: label.to_string(),
        amount,
        formatted: format_currency(amount),
    }
}

/// Format an amount as whole euros with thousands separators
///
/// # Example
/// ```
/// use estimate_studio::aggregator::format_currency;
/// assert_eq!(format_currency(1234567.5), "€1,234,568");
/// assert_eq!(format_currency(-1234.6), "-€1,235");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}{}", CURRENCY_SYMBOL, amount);
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}{}{}", sign, CURRENCY_SYMBOL, group_thousands(&digits))
}

/// Format a price factor as a percentage with one decimal
pub fn format_factor(factor: f64) -> String {
    format!("{:.1}%", factor * 100.0)
}

/// Short month name for a 1-based month number
pub fn month_label(month: u8) -> &'static str {
    match month {
        1..=12 => MONTH_LABELS[usize::from(month) - 1],
        _ => "???",
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
