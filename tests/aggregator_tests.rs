use estimate_studio::aggregator::{
    compute_cost_drivers, compute_seasonal_curve, compute_vendor_groups, derive_metrics,
    summarize_costs, DerivedMetrics,
};
use estimate_studio::parser::{parse_record, EstimateRecord};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn line_item(name: &str, total: f64) -> Value {
    json!({
        "material_name": name,
        "quantity": 1.0,
        "unit": "lot",
        "unit_price": total,
        "total_price": total,
        "seasonal_factor": 1.0
    })
}

fn offer(vendor: &str) -> Value {
    json!({
        "vendor_name": vendor,
        "location": "Athens",
        "price": 10.0,
        "stock_status": "In Stock",
        "lead_time_days": 7,
        "moq": 1.0,
        "contact": "N/A"
    })
}

fn record(items: Vec<Value>, total_cost: f64) -> EstimateRecord {
    parse_record(&json!({
        "id": "est",
        "boq_items": items,
        "total_cost": total_cost,
        "confidence_bands": {"P25": 0.0, "P50": 0.0, "P75": 0.0}
    }))
    .unwrap()
}

fn record_with_samples(samples: Value) -> EstimateRecord {
    parse_record(&json!({
        "id": "est",
        "boq_items": [],
        "total_cost": 0.0,
        "confidence_bands": {"P25": 0.0, "P50": 0.0, "P75": 0.0},
        "seasonal_chart_data": samples
    }))
    .unwrap()
}

#[test]
fn test_cost_drivers_example() {
    let record = record(vec![line_item("Steel", 6000.0), line_item("Concrete", 4000.0)], 10000.0);

    let drivers = compute_cost_drivers(&record);

    let summary: Vec<(&str, f64)> = drivers
        .iter()
        .map(|d| (d.item.material_name.as_str(), d.percentage))
        .collect();
    assert_eq!(summary, vec![("Steel", 60.0), ("Concrete", 40.0)]);
}

#[test]
fn test_cost_drivers_sorted_and_sum_to_100() {
    let record = record(
        vec![
            line_item("Sand", 120.0),
            line_item("Steel", 900.0),
            line_item("Labor", 2500.0),
            line_item("Formwork", 480.0),
        ],
        4000.0,
    );

    let drivers = compute_cost_drivers(&record);

    assert_eq!(drivers.len(), record.line_items.len());
    assert!(drivers
        .windows(2)
        .all(|w| w[0].item.total_price >= w[1].item.total_price));

    let total: f64 = drivers.iter().map(|d| d.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_cost_drivers_zero_total() {
    let record = record(vec![line_item("Steel", 0.0), line_item("Sand", 0.0)], 0.0);

    let drivers = compute_cost_drivers(&record);

    assert!(drivers.iter().all(|d| d.percentage == 0.0));
}

#[test]
fn test_cost_drivers_stable_for_ties() {
    let record = record(
        vec![
            line_item("First", 500.0),
            line_item("Big", 900.0),
            line_item("Second", 500.0),
            line_item("Third", 500.0),
        ],
        2400.0,
    );

    let names: Vec<String> = compute_cost_drivers(&record)
        .into_iter()
        .map(|d| d.item.material_name)
        .collect();

    assert_eq!(names, vec!["Big", "First", "Second", "Third"]);
}

#[test]
fn test_cost_drivers_idempotent_and_input_unchanged() {
    let record = record(vec![line_item("A", 1.0), line_item("B", 3.0)], 4.0);
    let before = record.clone();

    let first = compute_cost_drivers(&record);
    let second = compute_cost_drivers(&record);

    assert_eq!(first, second);
    assert_eq!(record, before);
}

#[test]
fn test_seasonal_curve_example() {
    let record = record_with_samples(json!([
        {"month": 3, "material": "Steel", "price_factor": 1.2, "price": 120.0},
        {"month": 3, "material": "Steel", "price_factor": 1.0, "price": 100.0}
    ]));

    let curve = compute_seasonal_curve(&record);

    assert_eq!(curve.len(), 12);
    assert!((curve[2].factor - 1.1).abs() < 1e-12);
    for point in curve.iter().filter(|p| p.month != 3) {
        assert_eq!(point.factor, 1.0);
    }
}

#[test]
fn test_seasonal_curve_months_in_order() {
    let record = record_with_samples(json!([
        {"month": 12, "material": "Steel", "price_factor": 0.9, "price": 90.0},
        {"month": 1, "material": "Steel", "price_factor": 1.3, "price": 130.0}
    ]));

    let months: Vec<u8> = compute_seasonal_curve(&record).iter().map(|p| p.month).collect();

    assert_eq!(months, (1..=12).collect::<Vec<u8>>());
}

#[test]
fn test_vendor_groups_follow_line_item_order() {
    let record = parse_record(&json!({
        "id": "est",
        "boq_items": [line_item("Steel", 6000.0), line_item("Concrete", 4000.0)],
        "total_cost": 10000.0,
        "confidence_bands": {"P25": 0.0, "P50": 0.0, "P75": 0.0},
        "vendor_recommendations": {
            "Concrete": [offer("Attica Concrete")],
            "Steel": [offer("Hellenic Steel")]
        }
    }))
    .unwrap();

    let groups = compute_vendor_groups(&record);

    let materials: Vec<&str> = groups.iter().map(|g| g.material.as_str()).collect();
    assert_eq!(materials, vec!["Steel", "Concrete"]);
    assert_eq!(groups[0].vendors[0].vendor_name, "Hellenic Steel");
}

#[test]
fn test_vendor_groups_append_unmatched_in_mapping_order() {
    let record = parse_record(&json!({
        "id": "est",
        "boq_items": [line_item("Steel", 1.0), line_item("Steel", 2.0), line_item("Sand", 1.0)],
        "total_cost": 4.0,
        "confidence_bands": {"P25": 0.0, "P50": 0.0, "P75": 0.0},
        "vendor_recommendations": {
            "Zinc": [offer("Z")],
            "Steel": [offer("S")],
            "Aluminium": [offer("A")]
        }
    }))
    .unwrap();

    let before = record.clone();
    let groups = compute_vendor_groups(&record);

    let materials: Vec<&str> = groups.iter().map(|g| g.material.as_str()).collect();
    assert_eq!(materials, vec!["Steel", "Zinc", "Aluminium"]);
    assert_eq!(groups, compute_vendor_groups(&record));
    assert_eq!(record, before);
}

#[test]
fn test_derive_metrics_on_fixture() {
    let raw: Value = serde_json::from_str(include_str!("fixtures/hotel_estimate.json")).unwrap();
    let record = parse_record(&raw).unwrap();

    let metrics = derive_metrics(&record);

    assert_eq!(metrics.cost_drivers[0].item.material_name, "Skilled Labor");
    assert_eq!(metrics.cost_drivers.len(), 4);
    assert!((metrics.seasonal_curve[0].factor - 0.955).abs() < 1e-9);
    assert!((metrics.seasonal_curve[7].factor - 1.1).abs() < 1e-9);
    assert_eq!(metrics.seasonal_curve[1].factor, 1.0);

    let materials: Vec<&str> = metrics
        .vendor_groups
        .iter()
        .map(|g| g.material.as_str())
        .collect();
    assert_eq!(
        materials,
        vec!["Concrete C30/37", "Structural Steel S355", "Cement CEM II 42.5"]
    );
    assert_eq!(metrics.material_curves.len(), 2);
}

#[test]
fn test_summarize_costs() {
    let raw: Value = serde_json::from_str(include_str!("fixtures/hotel_estimate.json")).unwrap();
    let record = parse_record(&raw).unwrap();

    let summary = summarize_costs(&record);

    assert_eq!(summary.formatted_total, "€264,416");
    assert_eq!(summary.optimistic.label, "Optimistic (P25)");
    assert_eq!(summary.optimistic.formatted, "€224,754");
    assert_eq!(summary.conservative.formatted, "€304,079");
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_record_and_metrics_are_send_sync() {
    assert_send_sync::<EstimateRecord>();
    assert_send_sync::<DerivedMetrics>();
}

#[test]
fn test_derive_metrics_in_parallel() {
    let raw: Value = serde_json::from_str(include_str!("fixtures/hotel_estimate.json")).unwrap();
    let record = parse_record(&raw).unwrap();

    let (first, second, vendors) = std::thread::scope(|s| {
        let first = s.spawn(|| derive_metrics(&record));
        let second = s.spawn(|| derive_metrics(&record));
        let vendors = s.spawn(|| compute_vendor_groups(&record));
        (
            first.join().unwrap(),
            second.join().unwrap(),
            vendors.join().unwrap(),
        )
    });

    assert_eq!(first, second);
    assert_eq!(first, derive_metrics(&record));
    assert_eq!(vendors, first.vendor_groups);
}
