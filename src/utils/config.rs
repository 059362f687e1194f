//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default base URL of the estimation engine
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the engine base URL
pub const API_URL_ENV: &str = "ESTIMATE_API_URL";

/// Default timeout for engine requests
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Seasonal factor reported for months without samples
pub const NEUTRAL_SEASONAL_FACTOR: f64 = 1.0;

/// Relative tolerance used when cross-checking engine totals
pub const CONSISTENCY_TOLERANCE: f64 = 0.01;

/// Number of cost drivers shown in text summaries
pub const DEFAULT_TOP_DRIVERS: usize = 5;

/// Upper bound for --top-drivers
pub const MAX_TOP_DRIVERS: usize = 1000;

// The engine prices everything in euro
pub const CURRENCY_SYMBOL: &str = "€";

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Field names for record parsing (engine emits snake_case, older clients camelCase)
pub const LINE_ITEM_FIELD_NAMES: &[&str] = &["boq_items", "boqItems", "line_items", "lineItems"];
pub const SAMPLE_FIELD_NAMES: &[&str] = &[
    "seasonal_chart_data",
    "seasonalChartData",
    "seasonal_samples",
    "seasonalSamples",
];
pub const VENDOR_FIELD_NAMES: &[&str] = &["vendor_recommendations", "vendorRecommendations"];
pub const BAND_FIELD_NAMES: &[&str] = &["confidence_bands", "confidenceBands"];
pub const TOTAL_FIELD_NAMES: &[&str] = &["total_cost", "totalCost"];
