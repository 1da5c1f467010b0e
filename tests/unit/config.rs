//! Unit tests for analysis configuration

use quantlens::config::AnalysisConfig;
use quantlens::error::{AnalysisError, ConfigError};
use std::io::Write;

fn assert_invalid(config: AnalysisConfig) {
    match config.validate() {
        Err(AnalysisError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_default_config_is_valid() {
    let config = AnalysisConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.ma_periods, vec![5, 10, 20, 60]);
    assert_eq!((config.crossover.fast, config.crossover.slow), (5, 20));
    assert_eq!((config.macd.fast, config.macd.slow, config.macd.signal), (12, 26, 9));
    assert_eq!(config.rsi.period, 14);
    assert_eq!(config.rsi.overbought, 70.0);
    assert_eq!(config.rsi.oversold, 30.0);
    assert_eq!(config.bollinger.period, 20);
    assert_eq!(config.bollinger.std_dev_multiplier, 2.0);
}

#[test]
fn test_zero_periods_rejected() {
    assert_invalid(AnalysisConfig::default().with_ma_periods(&[0, 5, 20]));
    assert_invalid(AnalysisConfig::default().with_macd(0, 26, 9));
    assert_invalid(AnalysisConfig::default().with_macd(12, 26, 0));
    assert_invalid(AnalysisConfig::default().with_rsi(0, 70.0, 30.0));
    assert_invalid(AnalysisConfig::default().with_bollinger(0, 2.0));

    let mut config = AnalysisConfig::default();
    config.atr.period = 0;
    assert_invalid(config);
}

#[test]
fn test_inverted_thresholds_rejected() {
    assert_invalid(AnalysisConfig::default().with_rsi(14, 30.0, 70.0));
    assert_invalid(AnalysisConfig::default().with_rsi(14, 50.0, 50.0));
    assert_invalid(AnalysisConfig::default().with_rsi(14, 120.0, 30.0));
}

#[test]
fn test_crossover_pair_must_be_listed() {
    assert_invalid(AnalysisConfig::default().with_crossover(5, 30));
    assert_invalid(AnalysisConfig::default().with_crossover(20, 5));
    assert!(AnalysisConfig::default().with_crossover(10, 60).validate().is_ok());
}

#[test]
fn test_with_ma_periods_keeps_or_derives_crossover() {
    let kept = AnalysisConfig::default().with_ma_periods(&[20, 5]);
    assert_eq!(kept.ma_periods, vec![5, 20]);
    assert_eq!((kept.crossover.fast, kept.crossover.slow), (5, 20));

    let derived = AnalysisConfig::default().with_ma_periods(&[7, 30, 14]);
    assert_eq!((derived.crossover.fast, derived.crossover.slow), (7, 30));
    assert!(derived.validate().is_ok());
}

#[test]
fn test_bollinger_needs_two_bars_for_sample_std() {
    assert_invalid(AnalysisConfig::default().with_bollinger(1, 2.0));
    assert_invalid(AnalysisConfig::default().with_bollinger(20, 0.0));
    assert_invalid(AnalysisConfig::default().with_bollinger(20, f64::NAN));
}

#[test]
fn test_from_json_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"ma_periods": [5, 20], "rsi": {{"overbought": 80}}}}"#).unwrap();

    let config = AnalysisConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.ma_periods, vec![5, 20]);
    assert_eq!(config.rsi.overbought, 80.0);
    assert_eq!(config.rsi.oversold, 30.0);
    assert_eq!(config.rsi.period, 14);
    assert_eq!(config.macd.slow, 26);
    assert_eq!(config.volume_ma.period, 5);
}

#[test]
fn test_from_json_file_rejects_invalid_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"rsi": {{"overbought": 20, "oversold": 40}}}}"#).unwrap();

    let result = AnalysisConfig::from_json_file(file.path());
    assert!(matches!(
        result,
        Err(ConfigError::Invalid(AnalysisError::InvalidConfiguration(_)))
    ));
}

#[test]
fn test_from_json_file_reports_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(
        AnalysisConfig::from_json_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}
