//! Estimate request model sent to the engine.

use crate::utils::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of construction project the engine can price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ProjectType {
    Bridge,
    Hotel,
    BusinessPark,
}

impl ProjectType {
    /// Size unit the engine's parametric model expects
    pub fn default_size_unit(&self) -> &'static str {
        match self {
            Self::Bridge => "lane_km",
            Self::Hotel => "rooms",
            Self::BusinessPark => "m2",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bridge => "bridge",
            Self::Hotel => "hotel",
            Self::BusinessPark => "business_park",
        })
    }
}

/// Project parameters for `POST /estimate/run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub project_type: ProjectType,
    pub location: String,
    pub size: f64,
    pub size_unit: String,

    /// Calendar month construction starts, 1 = January
    pub start_month: u8,
    pub duration_months: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storey_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facade_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concrete_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebar_grade: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earthworks_volume: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_vendors: Option<Vec<String>>,
}

impl EstimateRequest {
    /// Create a request with only the required parameters
    pub fn new(project_type: ProjectType, location: impl Into<String>, size: f64) -> Self {
        Self {
            project_type,
            location: location.into(),
            size,
            size_unit: project_type.default_size_unit().to_string(),
            start_month: 1,
            duration_months: 12,
            structural_class: None,
            star_rating: None,
            storey_count: None,
            facade_type: None,
            concrete_class: None,
            rebar_grade: None,
            earthworks_volume: None,
            preferred_vendors: None,
        }
    }

    /// Check the request before sending it
    ///
    /// **Public** - the engine rejects these anyway, but with a less useful message
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.location.trim().is_empty() {
            return Err(ApiError::InvalidRequest("location cannot be empty".to_string()));
        }

        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ApiError::InvalidRequest(format!(
                "size must be greater than 0, got {}",
                self.size
            )));
        }

        if self.size_unit.trim().is_empty() {
            return Err(ApiError::InvalidRequest("size unit cannot be empty".to_string()));
        }

        if !(1..=12).contains(&self.start_month) {
            return Err(ApiError::InvalidRequest(format!(
                "start month must be between 1 and 12, got {}",
                self.start_month
            )));
        }

        if self.duration_months == 0 {
            return Err(ApiError::InvalidRequest(
                "duration must be at least 1 month".to_string(),
            ));
        }

        if let Some(volume) = self.earthworks_volume {
            if volume < 0.0 {
                return Err(ApiError::InvalidRequest(format!(
                    "earthworks volume cannot be negative, got {}",
                    volume
                )));
            }
        }

        Ok(())
    }
}
