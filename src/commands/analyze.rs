//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the estimate (from a file, or from the engine)
//! 2. Validates it into an estimate record
//! 3. Derives seasonal curves, cost drivers and vendor groups
//! 4. Writes the report and prints the summary

use super::models::{AnalyzeArgs, EstimateSource};
use crate::output::{read_estimate, render_summary, to_report, write_report, EstimateReport};
use crate::parser::{parse_record, EstimateRecord};
use crate::rpc::EngineClient;
use crate::utils::config::MAX_TOP_DRIVERS;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The generated report, after it has been written and printed as requested
///
/// # Errors
/// * Engine connection failures
/// * Malformed estimate records
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<EstimateReport> {
    let start_time = Instant::now();

    // Step 1: Load estimate
    info!("Step 1/4: Loading estimate...");
    let record = load_record(&args.source)?;

    debug!(
        "Loaded estimate {}: {} line items, total {}",
        record.id,
        record.line_items.len(),
        record.total_cost
    );

    // Step 2: Derive metrics
    info!("Step 2/4: Deriving metrics...");
    let report = to_report(&record);

    debug!("Top 3 cost drivers:");
    for (i, driver) in report.metrics.cost_drivers.iter().take(3).enumerate() {
        debug!(
            "  {}. {} ({:.1}%): {}",
            i + 1,
            driver.item.total_price,
            driver.percentage,
            driver.item.material_name
        );
    }

    // Step 3: Write report (if requested)
    if let Some(path) = &args.output_json {
        info!("Step 3/4: Writing report...");
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    } else {
        info!("Step 3/4: Skipping report file (not requested)");
    }

    // Step 4: Print text summary (if requested)
    if args.print_summary {
        info!("Step 4/4: Rendering summary...");
        println!("\n{}", "=".repeat(80));
        println!("ESTIMATE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", render_summary(&report, args.top_drivers));
        println!("{}", "=".repeat(80));
    } else {
        info!("Step 4/4: Skipping summary (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Load and validate the estimate from its source
///
/// **Private** - internal helper for execute_analyze
fn load_record(source: &EstimateSource) -> Result<EstimateRecord> {
    match source {
        EstimateSource::File(path) => read_estimate(path)
            .with_context(|| format!("Failed to load estimate from {}", path.display())),

        EstimateSource::Saved {
            api_url,
            estimate_id,
        } => {
            let client =
                EngineClient::new(api_url.as_str()).context("Failed to create engine client")?;
            let raw = client
                .get_estimate(estimate_id)
                .with_context(|| format!("Failed to fetch estimate {}", estimate_id))?;
            parse_record(&raw).context("Engine returned a malformed estimate")
        }

        EstimateSource::Run { api_url, request } => {
            let client =
                EngineClient::new(api_url.as_str()).context("Failed to create engine client")?;
            let raw = client.run_estimate(request).context("Failed to run estimate")?;
            parse_record(&raw).context("Engine returned a malformed estimate")
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    match &args.source {
        EstimateSource::File(path) => {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Estimate file path cannot be empty");
            }
        }
        EstimateSource::Saved {
            api_url,
            estimate_id,
        } => {
            validate_api_url(api_url)?;
            if estimate_id.trim().is_empty() {
                anyhow::bail!("Estimate id cannot be empty");
            }
        }
        EstimateSource::Run { api_url, request } => {
            validate_api_url(api_url)?;
            request.validate()?;
        }
    }

    if args.top_drivers == 0 {
        anyhow::bail!("top_drivers must be greater than 0");
    }

    if args.top_drivers > MAX_TOP_DRIVERS {
        anyhow::bail!("top_drivers is too large (max {})", MAX_TOP_DRIVERS);
    }

    Ok(())
}

/// Validate the engine base URL
///
/// **Public** - shared by all engine-backed commands
pub fn validate_api_url(api_url: &str) -> Result<()> {
    if api_url.is_empty() {
        anyhow::bail!("API URL cannot be empty");
    }

    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        anyhow::bail!("API URL must start with http:// or https://");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{EstimateRequest, ProjectType};

    fn saved(api_url: &str, estimate_id: &str) -> EstimateSource {
        EstimateSource::Saved {
            api_url: api_url.to_string(),
            estimate_id: estimate_id.to_string(),
        }
    }

    #[test]
    fn test_validate_args_default() {
        assert!(validate_args(&AnalyzeArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_invalid_api_scheme() {
        let args = AnalyzeArgs {
            source: saved("ftp://localhost:8000", "abc"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_estimate_id() {
        let args = AnalyzeArgs {
            source: saved("http://localhost:8000", " "),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_request() {
        let mut request = EstimateRequest::new(ProjectType::Hotel, "Athens", 100.0);
        request.start_month = 14;
        let args = AnalyzeArgs {
            source: EstimateSource::Run {
                api_url: "http://localhost:8000".to_string(),
                request,
            },
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_drivers_bounds() {
        let zero = AnalyzeArgs {
            top_drivers: 0,
            ..Default::default()
        };
        let huge = AnalyzeArgs {
            top_drivers: 2000,
            ..Default::default()
        };
        assert!(validate_args(&zero).is_err());
        assert!(validate_args(&huge).is_err());
    }
}
