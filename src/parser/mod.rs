//! Estimate record parsing and schema definitions.
//!
//! This module handles:
//! - Validating raw estimate JSON from the engine
//! - Defining the typed estimate record
//! - Request and catalog shapes exchanged with the engine

pub mod catalog;
pub mod estimate;
pub mod request;
pub mod schema;

// Re-export main types
pub use catalog::{Material, Vendor};
pub use estimate::{check_consistency, parse_record, parse_record_str};
pub use request::{EstimateRequest, ProjectType};
pub use schema::{
    ConfidenceBands, EstimateRecord, LineItem, SeasonalSample, StockStatus, VendorGroup,
    VendorOffer,
};
