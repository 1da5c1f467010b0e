//! quantlens analyze
//!
//! Loads daily bars from a JSON quote file, runs the technical analysis
//! engine and prints the report as JSON on stdout. Logs go to stderr.
//! See `analyze --help` for arguments.

use clap::Parser;
use dotenvy::dotenv;
use quantlens::cli::{self, Args, CliError};
use quantlens::config::get_environment;
use quantlens::logging;
use tracing::info;

fn main() {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    info!(
        environment = %get_environment(),
        bars = %args.bars.display(),
        "Starting quantlens analyze"
    );

    let report = cli::run(args)?;

    info!(
        symbol = report.symbol.as_deref().unwrap_or_default(),
        as_of = %report.as_of,
        bars = report.bar_count,
        action = ?report.signal.action,
        confidence = ?report.signal.confidence,
        "{}",
        report.signal.rationale
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
