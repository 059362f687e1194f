//! Group vendor recommendations under bill-of-quantities order.

use crate::parser::schema::{EstimateRecord, VendorGroup};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Re-key vendor recommendations by line item order
///
/// **Public** - main entry point for vendor grouping
///
/// # Returns
/// One group per material in the vendor mapping. Materials appear in the
/// order they first occur in the line items; materials that only appear in
/// the vendor mapping follow in their original mapping order. Line items
/// without vendor recommendations produce no group.
pub fn compute_vendor_groups(record: &EstimateRecord) -> Vec<VendorGroup> {
    let by_material: HashMap<&str, &VendorGroup> = record
        .vendor_recommendations
        .iter()
        .map(|group| (group.material.as_str(), group))
        .collect();

    let mut placed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::with_capacity(record.vendor_recommendations.len());

    for item in &record.line_items {
        let material = item.material_name.as_str();
        if !placed.insert(material) {
            continue;
        }
        if let Some(group) = by_material.get(material) {
            groups.push((*group).clone());
        }
    }

    let trailing = record
        .vendor_recommendations
        .iter()
        .filter(|group| !placed.contains(group.material.as_str()));

    for group in trailing {
        debug!("Vendor group '{}' has no matching line item", group.material);
        groups.push(group.clone());
    }

    groups
}
