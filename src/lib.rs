//! Estimate Studio
//!
//! Derived cost metrics for construction project estimates.
//!
//! An estimation engine prices a project's bill of quantities and returns it
//! with seasonal price samples, confidence bands and vendor recommendations.
//! This crate validates that document once into an
//! [`parser::EstimateRecord`] and folds it into display-ready views:
//!
//! - a 12-month seasonal factor curve
//! - cost drivers ranked by total price
//! - vendor groups in bill-of-quantities order
//!
//! ```
//! use estimate_studio::aggregator::{compute_cost_drivers, compute_seasonal_curve};
//! use estimate_studio::parser::parse_record;
//!
//! let record = parse_record(&serde_json::json!({
//!     "id": "demo",
//!     "boq_items": [
//!         {"material_name": "Steel", "quantity": 100.0, "unit": "kg",
//!          "unit_price": 60.0, "total_price": 6000.0, "seasonal_factor": 1.0},
//!         {"material_name": "Concrete", "quantity": 40.0, "unit": "m3",
//!          "unit_price": 100.0, "total_price": 4000.0, "seasonal_factor": 1.0}
//!     ],
//!     "total_cost": 10000.0,
//!     "confidence_bands": {"P25": 8500.0, "P50": 10000.0, "P75": 11500.0}
//! }))
//! .unwrap();
//!
//! let drivers = compute_cost_drivers(&record);
//! assert_eq!(drivers[0].item.material_name, "Steel");
//! assert_eq!(drivers[0].percentage, 60.0);
//! assert_eq!(compute_seasonal_curve(&record).len(), 12);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod utils;
