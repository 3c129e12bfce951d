mod constructor;
mod errors;
mod parser;
mod runner;
mod writer;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for audit reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report grouped by dimension
    Text,
    /// Report serialized as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "qualitool",
    version,
    about = "qualitool - rule-based data quality auditing for CSV and Parquet files",
    long_about = "qualitool audits a dataset against rules grouped into five quality \
                  dimensions: Accuracy, Completeness, Uniqueness, Timeliness and Consistency. \
                  It reports how many rows violate each rule and can drop violating rows.\n\n\
                  Example usage:\n  \
                  qualitool --config audit.toml --details"
)]
pub struct Args {
    /// Path to the TOML configuration file describing the dataset and its rules
    #[arg(short, long, value_name = "FILE")]
    pub config: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Include the violating rows of each rule in the report
    #[arg(long)]
    pub details: bool,

    /// Write the report to this file or directory instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub report_file: Option<String>,

    /// Exit with status 2 when the audit finds violations or failed rules
    #[arg(long)]
    pub fail_on_violation: bool,

    /// Enable debug logging and detailed error backtraces
    #[arg(short, long)]
    pub debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = Args::parse();

    init_tracing(args.debug);

    match runner::run(&args) {
        Ok(clean) => {
            if !clean && args.fail_on_violation {
                std::process::exit(2);
            }
        }
        Err(err) => {
            if args.debug || std::env::var("RUST_BACKTRACE").is_ok() {
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("Error: {:#}", err);
                eprintln!("\nHint: Run with --debug flag for detailed stack traces");
            }
            std::process::exit(1);
        }
    }
}
