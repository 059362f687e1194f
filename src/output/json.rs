//! JSON report writer and estimate loader.
//!
//! Writes EstimateReport structs to JSON files with proper formatting and
//! loads estimate documents saved from the engine.

use super::report::EstimateReport;
use crate::parser::{parse_record, EstimateRecord};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = to_report(&record);
/// write_report(&report, "report.json")?;
/// ```
pub fn write_report(
    report: &EstimateReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<EstimateReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: EstimateReport =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, estimate {}",
        report.version, report.estimate_id
    );

    Ok(report)
}

/// Load and validate an estimate document saved from the engine
///
/// **Public** - entry point for offline analysis
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error
/// * `OutputError::SerializationFailed` - File is not JSON
/// * `OutputError::InvalidEstimate` - JSON is not a valid estimate record
pub fn read_estimate(input_path: impl AsRef<Path>) -> Result<EstimateRecord, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading estimate from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let raw: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    Ok(parse_record(&raw)?)
}

/// Validate the output path and create missing parent directories
///
/// **Crate** - shared by all file writers
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Crate** - internal utility
pub(crate) fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::to_report;
    use crate::parser::parse_record;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn create_test_record() -> EstimateRecord {
        parse_record(&json!({
            "id": "est-test",
            "boq_items": [
                {"material_name": "Steel S355", "quantity": 100.0, "unit": "kg",
                 "unit_price": 60.0, "total_price": 6000.0, "seasonal_factor": 1.0}
            ],
            "total_cost": 6000.0,
            "confidence_bands": {"P25": 5100.0, "P50": 6000.0, "P75": 6900.0}
        }))
        .unwrap()
    }

    #[test]
    fn test_write_and_read_report() {
        let report = to_report(&create_test_record());
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.estimate_id, "est-test");
        assert_eq!(loaded.metrics, report.metrics);
    }

    #[test]
    fn test_read_estimate_rejects_malformed() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), r#"{"id": "x", "boq_items": 3}"#).unwrap();

        let result = read_estimate(temp_file.path());
        assert!(matches!(result, Err(OutputError::InvalidEstimate(_))));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&to_report(&create_test_record()), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
