//! Monthly seasonal price factor curves.
//!
//! The engine reports one or more raw samples per (month, material). The
//! display curve averages them per calendar month and fills months without
//! samples with the neutral factor.

use crate::parser::schema::{EstimateRecord, SeasonalSample};
use crate::utils::config::NEUTRAL_SEASONAL_FACTOR;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One point of a seasonal curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPoint {
    /// Calendar month, 1 = January
    pub month: u8,

    /// Average price factor for the month
    pub factor: f64,
}

/// Seasonal curve for a single material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCurve {
    pub material: String,
    pub points: Vec<SeasonalPoint>,
}

/// Direction of a seasonal adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalTrend {
    Surcharge,
    Discount,
    Neutral,
}

impl SeasonalTrend {
    pub fn of(factor: f64) -> Self {
        if factor > NEUTRAL_SEASONAL_FACTOR {
            Self::Surcharge
        } else if factor < NEUTRAL_SEASONAL_FACTOR {
            Self::Discount
        } else {
            Self::Neutral
        }
    }

    /// Single-character marker for text output
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Surcharge => "+",
            Self::Discount => "-",
            Self::Neutral => "=",
        }
    }
}

/// Compute the all-materials seasonal curve
///
/// **Public** - main entry point for seasonal aggregation
///
/// # Returns
/// Exactly 12 points, months 1 through 12 in order. Each factor is the mean
/// of all samples for that month, summed in input order; months without
/// samples report exactly 1.0.
pub fn compute_seasonal_curve(record: &EstimateRecord) -> Vec<SeasonalPoint> {
    debug!(
        "Computing seasonal curve from {} samples",
        record.seasonal_samples.len()
    );
    monthly_average(&record.seasonal_samples)
}

/// Compute one seasonal curve per material
///
/// **Public** - materials appear in the order of their first sample
pub fn compute_material_curves(record: &EstimateRecord) -> Vec<MaterialCurve> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, Vec<&SeasonalSample>)> = Vec::new();

    for sample in &record.seasonal_samples {
        let slot = *index.entry(sample.material.as_str()).or_insert_with(|| {
            grouped.push((sample.material.as_str(), Vec::new()));
            grouped.len() - 1
        });
        grouped[slot].1.push(sample);
    }

    grouped
        .into_iter()
        .map(|(material, samples)| MaterialCurve {
            material: material.to_string(),
            points: monthly_average(samples),
        })
        .collect()
}

/// Average price factors per calendar month
///
/// **Private** - shared by the overall and per-material curves
fn monthly_average<'a>(samples: impl IntoIterator<Item = &'a SeasonalSample>) -> Vec<SeasonalPoint> {
    let mut sums = [0.0_f64; 12];
    let mut counts = [0_u32; 12];

    for sample in samples {
        // Validated records only carry months 1..=12
        let Some(slot) = month_slot(sample.month) else {
            debug!("Skipping sample with month {}", sample.month);
            continue;
        };
        sums[slot] += sample.price_factor;
        counts[slot] += 1;
    }

    (1..=12_u8)
        .zip(sums.iter().zip(counts.iter()))
        .map(|(month, (&sum, &count))| SeasonalPoint {
            month,
            factor: if count == 0 {
                NEUTRAL_SEASONAL_FACTOR
            } else {
                sum / f64::from(count)
            },
        })
        .collect()
}

fn month_slot(month: u8) -> Option<usize> {
    match month {
        1..=12 => Some(usize::from(month) - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::ConfidenceBands;

    fn sample(month: u8, material: &str, price_factor: f64) -> SeasonalSample {
        SeasonalSample {
            month,
            material: material.to_string(),
            price_factor,
            price: 100.0 * price_factor,
        }
    }

    fn record_with(samples: Vec<SeasonalSample>) -> EstimateRecord {
        EstimateRecord {
            id: "est".to_string(),
            line_items: vec![],
            total_cost: 0.0,
            confidence_bands: ConfidenceBands { p25: 0.0, p50: 0.0, p75: 0.0 },
            vendor_recommendations: vec![],
            seasonal_samples: samples,
            assumptions: vec![],
        }
    }

    #[test]
    fn test_empty_samples_are_neutral() {
        let curve = compute_seasonal_curve(&record_with(vec![]));
        assert_eq!(curve.len(), 12);
        for (i, point) in curve.iter().enumerate() {
            assert_eq!(point.month as usize, i + 1);
            assert_eq!(point.factor, 1.0);
        }
    }

    #[test]
    fn test_month_average() {
        let curve = compute_seasonal_curve(&record_with(vec![
            sample(3, "Steel", 1.2),
            sample(3, "Concrete", 1.0),
        ]));

        assert!((curve[2].factor - 1.1).abs() < 1e-12);
        assert_eq!(curve.iter().filter(|p| p.factor == 1.0).count(), 11);
    }

    #[test]
    fn test_out_of_range_month_is_skipped() {
        let curve = compute_seasonal_curve(&record_with(vec![sample(0, "Steel", 2.0)]));
        assert!(curve.iter().all(|p| p.factor == 1.0));
    }

    #[test]
    fn test_material_curves_keep_first_seen_order() {
        let curves = compute_material_curves(&record_with(vec![
            sample(1, "Rebar", 1.1),
            sample(1, "Cement", 0.9),
            sample(2, "Rebar", 1.3),
        ]));

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].material, "Rebar");
        assert_eq!(curves[1].material, "Cement");
        assert_eq!(curves[0].points[1].factor, 1.3);
        assert_eq!(curves[1].points[1].factor, 1.0);
    }

    #[test]
    fn test_trend() {
        assert_eq!(SeasonalTrend::of(1.05), SeasonalTrend::Surcharge);
        assert_eq!(SeasonalTrend::of(0.95), SeasonalTrend::Discount);
        assert_eq!(SeasonalTrend::of(1.0), SeasonalTrend::Neutral);
    }
}
