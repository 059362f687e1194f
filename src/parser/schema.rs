//! Estimate record schema definitions.
//!
//! These are the typed shapes of the document returned by the estimation
//! engine. Values are only ever built through [`super::parse_record`], which
//! validates the structural invariants, and are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile cost bands for a total or a unit price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBands {
    #[serde(rename = "P25", alias = "p25")]
    pub p25: f64,

    #[serde(rename = "P50", alias = "p50")]
    pub p50: f64,

    #[serde(rename = "P75", alias = "p75")]
    pub p75: f64,
}

impl ConfidenceBands {
    /// True when `P25 <= P50 <= P75`
    pub fn is_ordered(&self) -> bool {
        self.p25 <= self.p50 && self.p50 <= self.p75
    }
}

/// A priced bill-of-quantities line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(alias = "materialName")]
    pub material_name: String,

    pub quantity: f64,

    pub unit: String,

    /// Unit price after seasonal and regional adjustment
    #[serde(alias = "unitPrice")]
    pub unit_price: f64,

    #[serde(alias = "totalPrice")]
    pub total_price: f64,

    #[serde(alias = "seasonalFactor")]
    pub seasonal_factor: f64,

    /// Unit price bands, when the engine provides them per item
    #[serde(default, alias = "confidenceBand", skip_serializing_if = "Option::is_none")]
    pub confidence_band: Option<ConfidenceBands>,
}

/// Vendor-reported availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,

    #[serde(rename = "Limited Stock")]
    LimitedStock,

    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LimitedStock => "Limited Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "instock" => Ok(Self::InStock),
            "limitedstock" | "limited" => Ok(Self::LimitedStock),
            "outofstock" => Ok(Self::OutOfStock),
            _ => Err(format!("unknown stock status '{}'", s)),
        }
    }
}

impl TryFrom<String> for StockStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One supplier offer for a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOffer {
    #[serde(alias = "vendorName")]
    pub vendor_name: String,

    pub location: String,

    pub price: f64,

    #[serde(alias = "stockStatus")]
    pub stock_status: StockStatus,

    #[serde(alias = "leadTimeDays")]
    pub lead_time_days: u32,

    /// Minimum order quantity
    pub moq: f64,

    #[serde(default)]
    pub contact: String,
}

/// Vendor offers for one material, in the engine's ranking order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorGroup {
    pub material: String,
    pub vendors: Vec<VendorOffer>,
}

/// Raw seasonal price observation for one material in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalSample {
    /// Calendar month, 1 = January
    pub month: u8,

    pub material: String,

    #[serde(alias = "priceFactor")]
    pub price_factor: f64,

    pub price: f64,
}

/// Canonical priced estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRecord {
    pub id: String,

    /// Bill of quantities, in engine order
    pub line_items: Vec<LineItem>,

    pub total_cost: f64,

    pub confidence_bands: ConfidenceBands,

    /// Vendor mapping as ordered pairs, in the engine's mapping order
    pub vendor_recommendations: Vec<VendorGroup>,

    pub seasonal_samples: Vec<SeasonalSample>,

    pub assumptions: Vec<String>,
}

impl EstimateRecord {
    /// Vendor offers recommended for `material`, if any
    pub fn vendors_for(&self, material: &str) -> Option<&[VendorOffer]> {
        self.vendor_recommendations
            .iter()
            .find(|group| group.material == material)
            .map(|group| group.vendors.as_slice())
    }

    /// Sum of line item totals
    pub fn line_item_total(&self) -> f64 {
        self.line_items.iter().map(|item| item.total_price).sum()
    }
}
