//! Fuses detector events into one BUY / SELL / HOLD verdict.
//!
//! Rules are evaluated in a fixed priority order and the first match wins.
//! A rule's predicate returns the events it matched, in evaluation order;
//! those events become the signal's contributing events and rationale.

use crate::config::AnalysisConfig;
use crate::indicators::trend::ma_name;
use crate::models::signal::{
    Confidence, CrossEvent, CrossKind, MacdTrend, Signal, SignalAction, SignalEvent,
    ThresholdKind, ThresholdSource, TrendAlignment, NO_RULE_MATCHED,
};

pub type RulePredicate = fn(&EventView<'_>) -> Option<Vec<SignalEvent>>;

/// Declarative classifier rule.
#[derive(Clone)]
pub struct Rule {
    pub id: &'static str,
    pub label: &'static str,
    pub action: SignalAction,
    pub confidence: Confidence,
    predicate: RulePredicate,
}

impl Rule {
    pub fn new(
        id: &'static str,
        label: &'static str,
        action: SignalAction,
        confidence: Confidence,
        predicate: RulePredicate,
    ) -> Self {
        Self {
            id,
            label,
            action,
            confidence,
            predicate,
        }
    }

    /// Events matched by this rule, `None` if it does not apply.
    pub fn evaluate(&self, view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
        (self.predicate)(view)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("action", &self.action)
            .field("confidence", &self.confidence)
            .finish()
    }
}

/// Indexed access to the events of one bar.
#[derive(Debug, Default)]
pub struct EventView<'a> {
    ma_cross: Option<&'a SignalEvent>,
    macd_trend: Option<&'a SignalEvent>,
    alignment: Option<&'a SignalEvent>,
    rsi: Option<&'a SignalEvent>,
    band: Option<&'a SignalEvent>,
}

impl<'a> EventView<'a> {
    /// Index `events`. A cross counts as the MA cross when it is between the
    /// series named `ma_fast` and `ma_slow`; other crosses are context only.
    pub fn new(events: &'a [SignalEvent], ma_fast: &str, ma_slow: &str) -> Self {
        let mut view = EventView::default();
        for event in events {
            match event {
                SignalEvent::Cross(CrossEvent {
                    fast_name,
                    slow_name,
                    ..
                }) if fast_name == ma_fast && slow_name == ma_slow => view.ma_cross = Some(event),
                SignalEvent::Cross(_) => {}
                SignalEvent::MacdTrend(_) => view.macd_trend = Some(event),
                SignalEvent::Trend(_) => view.alignment = Some(event),
                SignalEvent::Threshold(t) => match t.source {
                    ThresholdSource::Rsi => view.rsi = Some(event),
                    ThresholdSource::Bollinger => view.band = Some(event),
                },
            }
        }
        view
    }

    pub fn ma_cross(&self, kind: CrossKind) -> Option<&'a SignalEvent> {
        self.ma_cross
            .filter(|e| matches!(e, SignalEvent::Cross(c) if c.kind == kind))
    }

    pub fn macd(&self, trend: MacdTrend) -> Option<&'a SignalEvent> {
        self.macd_trend
            .filter(|e| matches!(e, SignalEvent::MacdTrend(m) if m.trend == trend))
    }

    pub fn alignment(&self, alignment: TrendAlignment) -> Option<&'a SignalEvent> {
        self.alignment
            .filter(|e| matches!(e, SignalEvent::Trend(t) if t.alignment == alignment))
    }

    pub fn rsi(&self, kind: ThresholdKind) -> Option<&'a SignalEvent> {
        self.rsi
            .filter(|e| matches!(e, SignalEvent::Threshold(t) if t.kind == kind))
    }

    /// RSI reading of any kind, when RSI was computable.
    pub fn rsi_reading(&self) -> Option<&'a SignalEvent> {
        self.rsi
    }

    pub fn band(&self, kind: ThresholdKind) -> Option<&'a SignalEvent> {
        self.band
            .filter(|e| matches!(e, SignalEvent::Threshold(t) if t.kind == kind))
    }

    pub fn is_empty(&self) -> bool {
        self.ma_cross.is_none()
            && self.macd_trend.is_none()
            && self.alignment.is_none()
            && self.rsi.is_none()
            && self.band.is_none()
    }
}

fn ma_golden_cross(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let cross = view.ma_cross(CrossKind::GoldenCross)?;
    let macd = view.macd(MacdTrend::Bullish)?;
    if view.rsi(ThresholdKind::Overbought).is_some() {
        return None;
    }
    let mut matched = vec![cross.clone(), macd.clone()];
    matched.extend(view.rsi_reading().cloned());
    Some(matched)
}

fn ma_death_cross(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let cross = view.ma_cross(CrossKind::DeathCross)?;
    let macd = view.macd(MacdTrend::Bearish)?;
    if view.rsi(ThresholdKind::Oversold).is_some() {
        return None;
    }
    let mut matched = vec![cross.clone(), macd.clone()];
    matched.extend(view.rsi_reading().cloned());
    Some(matched)
}

fn oversold_reversion(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let rsi = view.rsi(ThresholdKind::Oversold)?;
    let band = view.band(ThresholdKind::Oversold)?;
    Some(vec![rsi.clone(), band.clone()])
}

fn overbought_reversion(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let rsi = view.rsi(ThresholdKind::Overbought)?;
    let band = view.band(ThresholdKind::Overbought)?;
    Some(vec![rsi.clone(), band.clone()])
}

fn bullish_alignment(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let trend = view.alignment(TrendAlignment::Bullish)?;
    let macd = view.macd(MacdTrend::Bullish)?;
    Some(vec![trend.clone(), macd.clone()])
}

fn bearish_alignment(view: &EventView<'_>) -> Option<Vec<SignalEvent>> {
    let trend = view.alignment(TrendAlignment::Bearish)?;
    let macd = view.macd(MacdTrend::Bearish)?;
    Some(vec![trend.clone(), macd.clone()])
}

/// The built-in decision table, highest priority first.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "ma_golden_cross",
            "golden cross confirmed by MACD",
            SignalAction::Buy,
            Confidence::High,
            ma_golden_cross,
        ),
        Rule::new(
            "ma_death_cross",
            "death cross confirmed by MACD",
            SignalAction::Sell,
            Confidence::High,
            ma_death_cross,
        ),
        Rule::new(
            "oversold_reversion",
            "oversold below the lower band",
            SignalAction::Buy,
            Confidence::Medium,
            oversold_reversion,
        ),
        Rule::new(
            "overbought_reversion",
            "overbought above the upper band",
            SignalAction::Sell,
            Confidence::Medium,
            overbought_reversion,
        ),
        Rule::new(
            "bullish_alignment",
            "bullish MA alignment with MACD support",
            SignalAction::Buy,
            Confidence::Low,
            bullish_alignment,
        ),
        Rule::new(
            "bearish_alignment",
            "bearish MA alignment with MACD pressure",
            SignalAction::Sell,
            Confidence::Low,
            bearish_alignment,
        ),
    ]
}

/// Ordered rule table plus the names of the MA pair it treats as "the" cross.
#[derive(Debug, Clone)]
pub struct CompositeClassifier {
    rules: Vec<Rule>,
    ma_fast: String,
    ma_slow: String,
}

impl CompositeClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self::with_rules(config, default_rules())
    }

    pub fn with_rules(config: &AnalysisConfig, rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ma_fast: ma_name(config.crossover.fast),
            ma_slow: ma_name(config.crossover.slow),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First matching rule decides. No events at all reads as insufficient
    /// data; events that match no rule give a plain HOLD.
    pub fn classify(&self, events: &[SignalEvent]) -> Signal {
        if events.is_empty() {
            return Signal::insufficient_data();
        }

        let view = EventView::new(events, &self.ma_fast, &self.ma_slow);
        if view.is_empty() {
            return Signal::hold(NO_RULE_MATCHED);
        }

        for rule in &self.rules {
            if let Some(matched) = rule.evaluate(&view) {
                return Signal {
                    action: rule.action,
                    confidence: rule.confidence,
                    rule: Some(rule.id.to_string()),
                    rationale: rationale(rule.label, &matched),
                    contributing_events: matched,
                };
            }
        }

        Signal::hold(NO_RULE_MATCHED)
    }
}

fn rationale(label: &str, events: &[SignalEvent]) -> String {
    let details: Vec<String> = events.iter().map(ToString::to_string).collect();
    format!("{}: {}", label, details.join("; "))
}
