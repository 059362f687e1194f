//! Estimate Studio CLI
//!
//! Fetches or loads construction project estimates and derives seasonal
//! curves, cost drivers and vendor groupings from them.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use estimate_studio::commands::{
    display_schema, display_version, execute_analyze, execute_export, list_materials,
    list_vendors, validate_args, validate_estimate_file, validate_export_args, AnalyzeArgs,
    EstimateSource, ExportArgs,
};
use estimate_studio::parser::{EstimateRequest, ProjectType};
use estimate_studio::rpc::ExportFormat;
use estimate_studio::utils::config::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_TOP_DRIVERS};

/// Estimate Studio - derived metrics for construction cost estimates
#[derive(Parser, Debug)]
#[command(name = "estimate-studio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Engine connection options
#[derive(Args, Debug)]
struct ApiOptions {
    /// Estimation engine base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,
}

/// Report options shared by analysis commands
#[derive(Args, Debug)]
struct ReportOptions {
    /// Output path for JSON report (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of cost drivers listed in the summary
    #[arg(long, default_value_t = DEFAULT_TOP_DRIVERS)]
    top_drivers: usize,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Request a new estimate from the engine and analyze it
    Run {
        #[command(flatten)]
        api: ApiOptions,

        /// Project type
        #[arg(long, value_enum)]
        project_type: ProjectType,

        /// Project location (e.g. "Athens")
        #[arg(long)]
        location: String,

        /// Project size, in the size unit
        #[arg(long)]
        size: f64,

        /// Size unit (defaults per project type: lane_km, rooms, m2)
        #[arg(long)]
        size_unit: Option<String>,

        /// Start month (1-12)
        #[arg(long, default_value = "1")]
        start_month: u8,

        /// Duration in months
        #[arg(long, default_value = "12")]
        duration_months: u32,

        /// Structural class (e.g. "moment frame")
        #[arg(long)]
        structural_class: Option<String>,

        /// Facade type (e.g. "curtain wall")
        #[arg(long)]
        facade_type: Option<String>,

        /// Earthworks volume in m3
        #[arg(long)]
        earthworks_volume: Option<f64>,

        /// Hotel star rating
        #[arg(long)]
        star_rating: Option<u8>,

        /// Number of storeys
        #[arg(long)]
        storey_count: Option<u32>,

        /// Concrete class (e.g. C30/37)
        #[arg(long)]
        concrete_class: Option<String>,

        /// Rebar grade (e.g. B500C)
        #[arg(long)]
        rebar_grade: Option<String>,

        /// Preferred vendor names (repeatable)
        #[arg(long = "preferred-vendor")]
        preferred_vendors: Vec<String>,

        #[command(flatten)]
        report: ReportOptions,
    },

    /// Fetch a saved estimate from the engine and analyze it
    Show {
        #[command(flatten)]
        api: ApiOptions,

        /// Estimate id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        report: ReportOptions,
    },

    /// Analyze an estimate JSON file
    Analyze {
        /// Path to estimate JSON file
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        report: ReportOptions,
    },

    /// Validate an estimate JSON file
    Validate {
        /// Path to estimate JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Download the engine's PDF or CSV export of an estimate
    Export {
        #[command(flatten)]
        api: ApiOptions,

        /// Estimate id
        #[arg(long)]
        id: String,

        /// Document format
        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        /// Output path (defaults to estimate_<id>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the engine's material catalog
    Catalog {
        #[command(flatten)]
        api: ApiOptions,
    },

    /// List the engine's vendors
    Vendors {
        #[command(flatten)]
        api: ApiOptions,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Run {
            api,
            project_type,
            location,
            size,
            size_unit,
            start_month,
            duration_months,
            structural_class,
            facade_type,
            earthworks_volume,
            star_rating,
            storey_count,
            concrete_class,
            rebar_grade,
            preferred_vendors,
            report,
        } => {
            let mut request = EstimateRequest::new(project_type, location, size);
            if let Some(unit) = size_unit {
                request.size_unit = unit;
            }
            request.start_month = start_month;
            request.duration_months = duration_months;
            request.structural_class = structural_class;
            request.facade_type = facade_type;
            request.earthworks_volume = earthworks_volume;
            request.star_rating = star_rating;
            request.storey_count = storey_count;
            request.concrete_class = concrete_class;
            request.rebar_grade = rebar_grade;
            if !preferred_vendors.is_empty() {
                request.preferred_vendors = Some(preferred_vendors);
            }

            let source = EstimateSource::Run {
                api_url: api.api_url,
                request,
            };
            run_analysis(source, report)?;
        }

        Commands::Show { api, id, report } => {
            let source = EstimateSource::Saved {
                api_url: api.api_url,
                estimate_id: id,
            };
            run_analysis(source, report)?;
        }

        Commands::Analyze { file, report } => {
            run_analysis(EstimateSource::File(file), report)?;
        }

        Commands::Validate { file } => {
            validate_estimate_file(&file)?;
        }

        Commands::Export {
            api,
            id,
            format,
            output,
        } => {
            let args = ExportArgs {
                api_url: api.api_url,
                estimate_id: id,
                format,
                output,
            };

            validate_export_args(&args)?;
            execute_export(args)?;
        }

        Commands::Catalog { api } => {
            list_materials(&api.api_url)?;
        }

        Commands::Vendors { api } => {
            list_vendors(&api.api_url)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Build analyze arguments, validate them, and run the analysis
fn run_analysis(source: EstimateSource, report: ReportOptions) -> Result<()> {
    let args = AnalyzeArgs {
        source,
        output_json: report.output,
        top_drivers: report.top_drivers,
        print_summary: report.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)?;
    Ok(())
}
