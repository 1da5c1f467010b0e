//! End-to-end scenarios through indicators, detector and classifier

use crate::support::{bars_from_closes, flat_closes, flat_then_rise};
use quantlens::config::AnalysisConfig;
use quantlens::indicators::moving_average;
use quantlens::models::signal::{
    Confidence, CrossKind, SignalAction, SignalEvent, ThresholdKind, ThresholdSource,
    NO_RULE_MATCHED,
};
use quantlens::signals::detector::cross_history;
use quantlens::TechnicalAnalyzer;

/// Short MACD so it is defined within 30 bars, and RSI bounds that never
/// fire so the cross rules decide.
fn short_history_analyzer() -> TechnicalAnalyzer {
    let config = AnalysisConfig::default()
        .with_ma_periods(&[5, 20])
        .with_macd(3, 6, 3)
        .with_rsi(14, 100.0, 0.0);
    TechnicalAnalyzer::new(config).unwrap()
}

fn rsi_event(events: &[SignalEvent]) -> Option<ThresholdKind> {
    events.iter().find_map(|e| match e {
        SignalEvent::Threshold(t) if t.source == ThresholdSource::Rsi => Some(t.kind),
        _ => None,
    })
}

#[test]
fn test_breakout_from_flat_is_golden_cross_buy() {
    let closes = flat_then_rise();
    let bars = bars_from_closes(&closes[..21]);
    let report = short_history_analyzer().analyze(&bars).unwrap();

    let cross = report.events.iter().find_map(|e| match e {
        SignalEvent::Cross(c) if c.fast_name == "MA5" => Some(c.clone()),
        _ => None,
    });
    let cross = cross.expect("MA5/MA20 cross on the breakout bar");
    assert_eq!(cross.kind, CrossKind::GoldenCross);
    assert_eq!(cross.at_index, 20);

    assert_eq!(report.signal.action, SignalAction::Buy);
    assert_eq!(report.signal.confidence, Confidence::High);
    assert_eq!(report.signal.rule.as_deref(), Some("ma_golden_cross"));
}

#[test]
fn test_rise_after_breakout_stays_buy() {
    let closes = flat_then_rise();
    let analyzer = short_history_analyzer();
    for len in 22..=closes.len() {
        let report = analyzer.analyze(&bars_from_closes(&closes[..len])).unwrap();
        assert_eq!(report.signal.action, SignalAction::Buy, "prefix of {len} bars");
        assert_eq!(report.signal.rule.as_deref(), Some("bullish_alignment"));
    }

    let crosses = cross_history(&moving_average(&closes, 5), &moving_average(&closes, 20));
    assert_eq!(crosses.len(), 1);
    assert_eq!(crosses[0].kind, CrossKind::GoldenCross);
}

#[test]
fn test_breakdown_from_flat_is_death_cross_sell() {
    let mut closes = flat_closes(20, 20.0);
    closes.extend((10..=19).rev().map(|c| c as f64));
    let report = short_history_analyzer()
        .analyze(&bars_from_closes(&closes[..21]))
        .unwrap();

    assert_eq!(report.signal.action, SignalAction::Sell);
    assert_eq!(report.signal.confidence, Confidence::High);
    assert_eq!(report.signal.rule.as_deref(), Some("ma_death_cross"));
}

#[test]
fn test_uninterrupted_losses_read_oversold() {
    let closes: Vec<f64> = (0..15).map(|i| 30.0 - i as f64).collect();
    let analyzer = TechnicalAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze(&bars_from_closes(&closes)).unwrap();

    assert_eq!(report.indicators.rsi.latest(), Some(0.0));
    assert_eq!(rsi_event(&report.events), Some(ThresholdKind::Oversold));
    // no Bollinger band yet, so the reversion rule cannot fire
    assert_eq!(report.signal.action, SignalAction::Hold);
    assert_eq!(report.signal.rationale, NO_RULE_MATCHED);
}

#[test]
fn test_sharp_drop_below_band_is_oversold_buy() {
    let mut closes = flat_closes(25, 10.0);
    closes.push(9.0);
    let analyzer = TechnicalAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze(&bars_from_closes(&closes)).unwrap();

    // the death cross has no MACD confirmation this early
    assert!(report.events.iter().any(|e| matches!(
        e,
        SignalEvent::Cross(c) if c.kind == CrossKind::DeathCross
    )));
    assert_eq!(report.signal.action, SignalAction::Buy);
    assert_eq!(report.signal.confidence, Confidence::Medium);
    assert_eq!(report.signal.rule.as_deref(), Some("oversold_reversion"));
}

#[test]
fn test_sharp_jump_above_band_is_overbought_sell() {
    let mut closes = flat_closes(25, 10.0);
    closes.push(11.0);
    let analyzer = TechnicalAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze(&bars_from_closes(&closes)).unwrap();

    assert_eq!(rsi_event(&report.events), Some(ThresholdKind::Overbought));
    assert_eq!(report.signal.action, SignalAction::Sell);
    assert_eq!(report.signal.rule.as_deref(), Some("overbought_reversion"));
}
