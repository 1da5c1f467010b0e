//! Unit tests for the analyze command-line surface

use crate::support::{bars_from_closes, choppy_closes};
use clap::error::ErrorKind;
use clap::Parser;
use quantlens::cli::{run, Args, CliError};
use quantlens::error::{AnalysisError, ProviderError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn bars_file(count: usize) -> NamedTempFile {
    let bars = bars_from_closes(&choppy_closes(count));
    json_file(&serde_json::to_string(&bars).unwrap())
}

fn args_for(bars: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["analyze".to_string(), bars.display().to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_symbol_defaults_to_file_stem() {
    let args = Args::try_parse_from(["analyze", "quotes/600519.SH.json"]).unwrap();
    assert_eq!(args.bars, Path::new("quotes/600519.SH.json"));
    assert_eq!(args.symbol(), "600519.SH");
    assert_eq!(args.limit, None);
}

#[test]
fn test_explicit_symbol_and_options() {
    let args = Args::try_parse_from([
        "analyze",
        "quotes.json",
        "AAPL",
        "--config",
        "analysis.json",
        "--limit",
        "120",
    ])
    .unwrap();
    assert_eq!(args.symbol(), "AAPL");
    assert_eq!(args.config.as_deref(), Some(Path::new("analysis.json")));
    assert_eq!(args.limit, Some(120));
}

#[test]
fn test_malformed_arguments_rejected() {
    let err = Args::try_parse_from(["analyze"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    assert!(Args::try_parse_from(["analyze", "quotes.json", "--limit", "many"]).is_err());
    assert!(Args::try_parse_from(["analyze", "quotes.json", "AAPL", "extra"]).is_err());
}

#[test]
fn test_run_analyzes_quote_file() {
    let file = bars_file(40);
    let report = run(&args_for(file.path(), &["AAPL", "--limit", "30"])).unwrap();
    assert_eq!(report.symbol.as_deref(), Some("AAPL"));
    assert_eq!(report.bar_count, 30);
}

#[test]
fn test_run_uses_config_file() {
    let file = bars_file(30);
    let config = json_file(r#"{"ma_periods": [3, 7], "crossover": {"fast": 3, "slow": 7}}"#);
    let config_path = config.path().display().to_string();
    let report = run(&args_for(file.path(), &["AAPL", "--config", &config_path])).unwrap();
    let periods: Vec<usize> = report.indicators.moving_averages.keys().copied().collect();
    assert_eq!(periods, vec![3, 7]);
}

#[test]
fn test_invalid_config_exit_code() {
    let file = bars_file(30);
    let config = json_file(r#"{"rsi": {"overbought": 20, "oversold": 40}}"#);
    let config_path = config.path().display().to_string();
    let err = run(&args_for(file.path(), &["AAPL", "--config", &config_path])).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
    assert_eq!(err.exit_code(), 2);

    let err = CliError::from(AnalysisError::InvalidConfiguration("bad".into()));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_provider_and_analysis_exit_codes() {
    let file = json_file(r#"{"AAPL": []}"#);
    let err = run(&args_for(file.path(), &["AAPL"])).unwrap_err();
    assert!(matches!(err, CliError::Provider(ProviderError::UnknownSymbol(_))));
    assert_eq!(err.exit_code(), 3);

    let mut bars = bars_from_closes(&choppy_closes(10));
    bars.swap(2, 3);
    let file = json_file(&serde_json::to_string(&bars).unwrap());
    let err = run(&args_for(file.path(), &["AAPL"])).unwrap_err();
    assert!(matches!(
        err,
        CliError::Analysis(AnalysisError::UnorderedInput { .. })
    ));
    assert_eq!(err.exit_code(), 4);
}
