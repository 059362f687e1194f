use crate::aggregator::format_currency;
use crate::output::read_estimate;
use crate::rpc::EngineClient;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate an estimate JSON file
pub fn validate_estimate_file(file_path: &Path) -> Result<()> {
    println!("Validating estimate: {}", file_path.display());

    let record = read_estimate(file_path)?;

    println!("✓ Valid estimate JSON");
    println!("  Estimate: {}", record.id);
    println!("  Total Cost: {}", format_currency(record.total_cost));
    println!("  Line Items: {}", record.line_items.len());
    println!("  Vendor Groups: {}", record.vendor_recommendations.len());
    println!("  Seasonal Samples: {}", record.seasonal_samples.len());

    Ok(())
}

/// Print the engine's material catalog
pub fn list_materials(api_url: &str) -> Result<()> {
    let client = EngineClient::new(api_url).context("Failed to create engine client")?;
    let materials = client.list_materials().context("Failed to fetch material catalog")?;

    println!("{} materials", materials.len());
    for material in &materials {
        println!(
            "  {:>4}  {:<32} {:<8} {:<16} {}",
            material.id, material.name, material.unit, material.category, material.spec
        );
    }

    Ok(())
}

/// Print the engine's vendor list
pub fn list_vendors(api_url: &str) -> Result<()> {
    let client = EngineClient::new(api_url).context("Failed to create engine client")?;
    let vendors = client.list_vendors().context("Failed to fetch vendors")?;

    println!("{} vendors", vendors.len());
    for vendor in &vendors {
        println!(
            "  {:>4}  {:<32} {:<16} reliability {:.2}  {}",
            vendor.id,
            vendor.name,
            vendor.region,
            vendor.reliability_score,
            vendor.email().unwrap_or("N/A")
        );
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Estimate Studio Report Schema");
    println!("Current Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  estimate_id: string        - Engine estimate identifier");
        println!("  confidence_bands: object   - P25/P50/P75 total cost");
        println!("  cost_summary: object       - Formatted total and labelled bands");
        println!("  metrics: object");
        println!("    seasonal_curve: array    - 12 monthly average price factors");
        println!("    material_curves: array   - Per-material monthly factors");
        println!("    cost_drivers: array      - Line items by total price, with percentage");
        println!("    vendor_groups: array     - Vendor offers in bill-of-quantities order");
        println!("  assumptions: array         - Engine assumptions (free text)");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Estimate Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Derived cost metrics for construction project estimates.");
}
