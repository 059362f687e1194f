//! Export command implementation.
//!
//! Downloads the engine-rendered PDF or CSV document for an estimate.

use super::analyze::validate_api_url;
use super::models::ExportArgs;
use crate::output::write_export;
use crate::rpc::EngineClient;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Execute the export command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path the document was written to
pub fn execute_export(args: ExportArgs) -> Result<PathBuf> {
    let output = export_path(&args);

    let client =
        EngineClient::new(args.api_url.as_str()).context("Failed to create engine client")?;
    let document = client
        .export_estimate(&args.estimate_id, args.format)
        .with_context(|| format!("Failed to export estimate {}", args.estimate_id))?;

    write_export(&document, &output).context("Failed to write export")?;

    info!("✓ {} export written to: {}", args.format, output.display());

    Ok(output)
}

/// Resolve the output path, defaulting to `estimate_<id>.<ext>`
///
/// **Public** - also used to report the destination before downloading
pub fn export_path(args: &ExportArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.file_name(&args.estimate_id)))
}

/// Validate export arguments
pub fn validate_export_args(args: &ExportArgs) -> Result<()> {
    validate_api_url(&args.api_url)?;

    if args.estimate_id.trim().is_empty() {
        anyhow::bail!("Estimate id cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::ExportFormat;

    #[test]
    fn test_export_path_default() {
        let args = ExportArgs {
            estimate_id: "abc".to_string(),
            format: ExportFormat::Csv,
            ..Default::default()
        };
        assert_eq!(export_path(&args), PathBuf::from("estimate_abc.csv"));
    }

    #[test]
    fn test_export_path_explicit() {
        let args = ExportArgs {
            estimate_id: "abc".to_string(),
            output: Some(PathBuf::from("out/report.pdf")),
            ..Default::default()
        };
        assert_eq!(export_path(&args), PathBuf::from("out/report.pdf"));
    }

    #[test]
    fn test_validate_export_args() {
        assert!(validate_export_args(&ExportArgs::default()).is_err());

        let args = ExportArgs {
            estimate_id: "abc".to_string(),
            ..Default::default()
        };
        assert!(validate_export_args(&args).is_ok());
    }
}
