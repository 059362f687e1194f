//! Reference listings served by the engine for display.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog entry from `GET /catalog/items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub spec: String,
}

/// Supplier entry from `GET /vendors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub contacts: HashMap<String, serde_json::Value>,
    pub reliability_score: f64,
}

impl Vendor {
    /// Contact email, if the vendor lists one
    pub fn email(&self) -> Option<&str> {
        self.contacts.get("email").and_then(|v| v.as_str())
    }
}
