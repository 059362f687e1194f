//! Plain-text summary of an estimate report.

use super::report::EstimateReport;
use crate::aggregator::{
    format_currency, format_factor, month_label, significant_cost_drivers, top_cost_drivers,
    SeasonalTrend,
};

/// Share of total cost above which a driver is flagged as significant
const SIGNIFICANT_DRIVER_PERCENT: f64 = 10.0;

/// Width of the material column in the drivers table
const MATERIAL_WIDTH: usize = 32;

/// Render a report as a human-readable text summary
///
/// **Public** - printed by the `--summary` flag
///
/// # Arguments
/// * `report` - Report to render
/// * `top_n` - Number of cost drivers to list
pub fn render_summary(report: &EstimateReport, top_n: usize) -> String {
    let mut lines = Vec::new();
    let summary = &report.cost_summary;
    let metrics = &report.metrics;

    lines.push(format!("  ESTIMATE {}", report.estimate_id));
    lines.push(format!("  Total cost: {}", summary.formatted_total));
    for band in summary.bands() {
        lines.push(format!("    {:<20} {:>16}", band.label, band.formatted));
    }

    // Cost drivers
    let significant =
        significant_cost_drivers(&metrics.cost_drivers, SIGNIFICANT_DRIVER_PERCENT).count();
    lines.push(String::new());
    lines.push(format!(
        "  TOP COST DRIVERS ({} of {}, {} above {:.0}%)",
        top_n.min(metrics.cost_drivers.len()),
        metrics.cost_drivers.len(),
        significant,
        SIGNIFICANT_DRIVER_PERCENT
    ));
    lines.push(format!("  ┏{}┳{}┳{}┳{}┓", bar(MATERIAL_WIDTH + 2), bar(18), bar(16), bar(9)));
    lines.push(format!(
        "  ┃ {:<width$} ┃ {:^16} ┃ {:^14} ┃ {:^7} ┃",
        "Material",
        "Quantity",
        "Total",
        "%",
        width = MATERIAL_WIDTH
    ));
    lines.push(format!("  ┣{}╋{}╋{}╋{}┫", bar(MATERIAL_WIDTH + 2), bar(18), bar(16), bar(9)));

    for driver in top_cost_drivers(&metrics.cost_drivers, top_n) {
        let item = &driver.item;
        let quantity = format!("{:.2} {}", item.quantity, item.unit);
        lines.push(format!(
            "  ┃ {:<width$} ┃ {:>16} ┃ {:>14} ┃ {:>6.1}% ┃",
            truncate(&item.material_name, MATERIAL_WIDTH),
            truncate(&quantity, 16),
            format_currency(item.total_price),
            driver.percentage,
            width = MATERIAL_WIDTH
        ));
    }
    lines.push(format!("  ┗{}┻{}┻{}┻{}┛", bar(MATERIAL_WIDTH + 2), bar(18), bar(16), bar(9)));

    // Seasonal curve
    lines.push(String::new());
    lines.push("  SEASONAL PRICE FACTORS".to_string());
    for point in &metrics.seasonal_curve {
        let trend = SeasonalTrend::of(point.factor);
        lines.push(format!(
            "    {} {:>7} {}",
            month_label(point.month),
            format_factor(point.factor),
            trend.marker()
        ));
    }

    // Vendors
    if !metrics.vendor_groups.is_empty() {
        lines.push(String::new());
        lines.push("  VENDOR RECOMMENDATIONS".to_string());
        for group in &metrics.vendor_groups {
            lines.push(format!("    {}", group.material));
            if group.vendors.is_empty() {
                lines.push("      (no vendors)".to_string());
            }
            for vendor in &group.vendors {
                lines.push(format!(
                    "      {} ({}) {} | {} | {} days | MOQ {} | {}",
                    vendor.vendor_name,
                    vendor.location,
                    format_currency(vendor.price),
                    vendor.stock_status,
                    vendor.lead_time_days,
                    vendor.moq,
                    vendor.contact
                ));
            }
        }
    }

    if !report.assumptions.is_empty() {
        lines.push(String::new());
        lines.push("  ASSUMPTIONS".to_string());
        for assumption in &report.assumptions {
            lines.push(format!("    - {}", assumption));
        }
    }

    lines.join("\n")
}

fn bar(width: usize) -> String {
    "━".repeat(width)
}

/// Truncate on a char boundary
fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let keep: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Steel", 10), "Steel");
        assert_eq!(truncate("Reinforcing bar B500C", 10), "Reinfor...");
        assert_eq!(truncate("Σκυρόδεμα C30/37", 8).chars().count(), 8);
    }
}
