//! Validating parser for estimate documents.
//!
//! Converts the untyped JSON returned by the estimation engine into an
//! [`EstimateRecord`] exactly once. Everything downstream works on the typed
//! record and can rely on its structural invariants.

use super::schema::{
    ConfidenceBands, EstimateRecord, LineItem, SeasonalSample, VendorGroup, VendorOffer,
};
use crate::utils::config::{
    BAND_FIELD_NAMES, CONSISTENCY_TOLERANCE, LINE_ITEM_FIELD_NAMES, SAMPLE_FIELD_NAMES,
    TOTAL_FIELD_NAMES, VENDOR_FIELD_NAMES,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

/// Parse a raw estimate document
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Estimate JSON as returned by the engine
///
/// # Returns
/// Validated, immutable estimate record
///
/// # Errors
/// * `ParseError::MalformedRecord` - a line item lacks a required numeric
///   field, bands are out of order, a vendor entry is not a sequence, a
///   seasonal sample has a month outside 1..=12, or any other structural
///   violation
pub fn parse_record(raw: &Value) -> Result<EstimateRecord, ParseError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ParseError::malformed("estimate must be a JSON object"))?;

    let id = extract_id(obj)?;
    debug!("Parsing estimate record: {}", id);

    let line_items = extract_line_items(obj)?;
    let total_cost = extract_total_cost(obj, &line_items)?;
    let confidence_bands = extract_confidence_bands(obj)?;
    let vendor_recommendations = extract_vendor_recommendations(obj)?;
    let seasonal_samples = extract_seasonal_samples(obj)?;
    let assumptions = extract_assumptions(obj)?;

    debug!(
        "Parsed {} line items, {} vendor groups, {} seasonal samples",
        line_items.len(),
        vendor_recommendations.len(),
        seasonal_samples.len()
    );

    let record = EstimateRecord {
        id,
        line_items,
        total_cost,
        confidence_bands,
        vendor_recommendations,
        seasonal_samples,
        assumptions,
    };

    for problem in check_consistency(&record) {
        warn!("Estimate {}: {}", record.id, problem);
    }

    Ok(record)
}

/// Parse an estimate document from JSON text
///
/// **Public** - convenience wrapper over [`parse_record`]
pub fn parse_record_str(json: &str) -> Result<EstimateRecord, ParseError> {
    let raw: Value = serde_json::from_str(json)?;
    parse_record(&raw)
}

/// Cross-check the engine's totals
///
/// **Public** - totals are trusted input, so problems are reported, never fatal
///
/// A line item is consistent when its total matches `quantity * unit_price`
/// (the engine folds the seasonal factor into the unit price) or
/// `quantity * unit_price * seasonal_factor`.
pub fn check_consistency(record: &EstimateRecord) -> Vec<String> {
    let mut problems = Vec::new();

    for (index, item) in record.line_items.iter().enumerate() {
        let folded = item.quantity * item.unit_price;
        let unfolded = folded * item.seasonal_factor;

        if !approx_eq(item.total_price, folded) && !approx_eq(item.total_price, unfolded) {
            problems.push(format!(
                "line item {} ({}) total {:.2} does not match quantity x unit price {:.2}",
                index, item.material_name, item.total_price, folded
            ));
        }
    }

    let sum = record.line_item_total();
    if !approx_eq(record.total_cost, sum) {
        problems.push(format!(
            "total cost {:.2} does not match line item sum {:.2}",
            record.total_cost, sum
        ));
    }

    problems
}

/// Relative comparison that tolerates the engine's rounding to cents
fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= CONSISTENCY_TOLERANCE * scale
}

/// Look up the first present field among accepted spellings
///
/// **Private** - internal helper
fn find_field<'a>(obj: &'a JsonObject, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| obj.get(*name))
}

/// Look up an optional array field, rejecting non-array values
///
/// **Private** - internal helper
fn find_array<'a>(
    obj: &'a JsonObject,
    names: &[&str],
    what: &str,
) -> Result<Option<&'a Vec<Value>>, ParseError> {
    match find_field(obj, names) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(values)) => Ok(Some(values)),
        Some(other) => Err(ParseError::malformed(format!(
            "{} must be an array, found {}",
            what,
            type_name(other)
        ))),
    }
}

/// Deserialize one array element, tagging errors with its position
///
/// **Private** - internal helper
fn parse_element<T: DeserializeOwned>(
    value: &Value,
    what: &str,
    index: usize,
) -> Result<T, ParseError> {
    T::deserialize(value)
        .map_err(|e| ParseError::malformed(format!("{} {}: {}", what, index, e)))
}

fn extract_id(obj: &JsonObject) -> Result<String, ParseError> {
    match obj.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ParseError::malformed("id must be a non-empty string")),
        None => Err(ParseError::malformed("missing field `id`")),
    }
}

fn extract_line_items(obj: &JsonObject) -> Result<Vec<LineItem>, ParseError> {
    let Some(values) = find_array(obj, LINE_ITEM_FIELD_NAMES, "boq_items")? else {
        warn!("No line items found in estimate");
        return Ok(Vec::new());
    };

    let mut items = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let item: LineItem = parse_element(value, "line item", index)?;

        if let Some(band) = &item.confidence_band {
            if !band.is_ordered() {
                return Err(ParseError::malformed(format!(
                    "line item {} ({}) confidence band is not ordered: P25={} P50={} P75={}",
                    index, item.material_name, band.p25, band.p50, band.p75
                )));
            }
        }

        items.push(item);
    }

    Ok(items)
}

/// Extract total cost, summing line items when the engine omitted it
fn extract_total_cost(obj: &JsonObject, line_items: &[LineItem]) -> Result<f64, ParseError> {
    match find_field(obj, TOTAL_FIELD_NAMES) {
        None | Some(Value::Null) => {
            warn!("No total_cost in estimate, summing line items");
            Ok(line_items.iter().map(|item| item.total_price).sum())
        }
        Some(value) => value.as_f64().ok_or_else(|| {
            ParseError::malformed(format!(
                "total_cost must be a number, found {}",
                type_name(value)
            ))
        }),
    }
}

fn extract_confidence_bands(obj: &JsonObject) -> Result<ConfidenceBands, ParseError> {
    let value = find_field(obj, BAND_FIELD_NAMES)
        .ok_or_else(|| ParseError::malformed("missing field `confidence_bands`"))?;

    let bands = ConfidenceBands::deserialize(value)
        .map_err(|e| ParseError::malformed(format!("confidence_bands: {}", e)))?;

    if !bands.is_ordered() {
        return Err(ParseError::malformed(format!(
            "confidence bands are not ordered: P25={} P50={} P75={}",
            bands.p25, bands.p50, bands.p75
        )));
    }

    Ok(bands)
}

fn extract_vendor_recommendations(obj: &JsonObject) -> Result<Vec<VendorGroup>, ParseError> {
    let mapping = match find_field(obj, VENDOR_FIELD_NAMES) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(mapping)) => mapping,
        Some(other) => {
            return Err(ParseError::malformed(format!(
                "vendor_recommendations must be an object, found {}",
                type_name(other)
            )))
        }
    };

    // Map iteration follows document order (serde_json preserve_order)
    let mut groups = Vec::with_capacity(mapping.len());
    for (material, value) in mapping {
        let Value::Array(offers) = value else {
            return Err(ParseError::malformed(format!(
                "vendor recommendations for '{}' must be a sequence, found {}",
                material,
                type_name(value)
            )));
        };

        let mut vendors = Vec::with_capacity(offers.len());
        for (index, offer) in offers.iter().enumerate() {
            let offer: VendorOffer =
                parse_element(offer, &format!("vendor offer for '{}'", material), index)?;
            validate_offer(&offer, material)?;
            vendors.push(offer);
        }

        groups.push(VendorGroup {
            material: material.clone(),
            vendors,
        });
    }

    Ok(groups)
}

fn validate_offer(offer: &VendorOffer, material: &str) -> Result<(), ParseError> {
    if offer.moq < 0.0 {
        return Err(ParseError::malformed(format!(
            "vendor '{}' for '{}' has negative moq {}",
            offer.vendor_name, material, offer.moq
        )));
    }
    Ok(())
}

fn extract_seasonal_samples(obj: &JsonObject) -> Result<Vec<SeasonalSample>, ParseError> {
    let Some(values) = find_array(obj, SAMPLE_FIELD_NAMES, "seasonal_chart_data")? else {
        debug!("No seasonal samples in estimate");
        return Ok(Vec::new());
    };

    let mut samples = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let sample: SeasonalSample = parse_element(value, "seasonal sample", index)?;

        if !(1..=12).contains(&sample.month) {
            return Err(ParseError::malformed(format!(
                "seasonal sample {} has month {} outside 1..=12",
                index, sample.month
            )));
        }
        if sample.price_factor <= 0.0 {
            return Err(ParseError::malformed(format!(
                "seasonal sample {} has non-positive price factor {}",
                index, sample.price_factor
            )));
        }
        if sample.price < 0.0 {
            return Err(ParseError::malformed(format!(
                "seasonal sample {} has negative price {}",
                index, sample.price
            )));
        }

        samples.push(sample);
    }

    Ok(samples)
}

fn extract_assumptions(obj: &JsonObject) -> Result<Vec<String>, ParseError> {
    let Some(values) = find_array(obj, &["assumptions"], "assumptions")? else {
        return Ok(Vec::new());
    };

    values
        .iter()
        .enumerate()
        .map(|(index, value)| parse_element::<String>(value, "assumption", index))
        .collect()
}

/// JSON type name for error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "id": "est-1",
            "boq_items": [],
            "total_cost": 0.0,
            "confidence_bands": {"P25": 0.0, "P50": 0.0, "P75": 0.0}
        })
    }

    #[test]
    fn test_parse_minimal_record() {
        let record = parse_record(&minimal()).unwrap();
        assert_eq!(record.id, "est-1");
        assert!(record.line_items.is_empty());
        assert!(record.vendor_recommendations.is_empty());
        assert!(record.seasonal_samples.is_empty());
        assert!(record.assumptions.is_empty());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = parse_record(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord(_)));
    }

    #[test]
    fn test_missing_id() {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove("id");
        assert!(parse_record(&raw).is_err());
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let mut raw = minimal();
        raw["id"] = json!(42);
        assert_eq!(parse_record(&raw).unwrap().id, "42");
    }

    #[test]
    fn test_total_cost_summed_when_missing() {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove("total_cost");
        raw["boq_items"] = json!([
            {"material_name": "Steel", "quantity": 2.0, "unit": "t", "unit_price": 10.0,
             "total_price": 20.0, "seasonal_factor": 1.0},
            {"material_name": "Sand", "quantity": 1.0, "unit": "t", "unit_price": 5.0,
             "total_price": 5.0, "seasonal_factor": 1.0}
        ]);
        assert_eq!(parse_record(&raw).unwrap().total_cost, 25.0);
    }

    #[test]
    fn test_null_total_cost_is_summed() {
        let mut raw = minimal();
        raw["total_cost"] = Value::Null;
        raw["boq_items"] = json!([
            {"material_name": "Gravel", "quantity": 3.0, "unit": "t", "unit_price": 12.0,
             "total_price": 36.0, "seasonal_factor": 1.0}
        ]);
        assert_eq!(parse_record(&raw).unwrap().total_cost, 36.0);
    }

    #[test]
    fn test_string_total_cost_rejected() {
        let mut raw = minimal();
        raw["total_cost"] = json!("lots");
        assert!(parse_record(&raw).is_err());
    }

    #[test]
    fn test_approx_eq_scales_with_magnitude() {
        assert!(approx_eq(1_000_000.0, 1_000_500.0));
        assert!(!approx_eq(100.0, 110.0));
        assert!(approx_eq(0.0, 0.001));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!({})), "object");
        assert_eq!(type_name(&json!("x")), "string");
    }
}
