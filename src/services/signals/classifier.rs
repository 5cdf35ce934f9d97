//! Rule-based scoring of an indicator set into BUY / SELL / HOLD.

use crate::types::{IndicatorSet, SignalKind};

/// Reason used when no rule fired.
pub const CONSOLIDATION_REASON: &str = "Market Consolidation";

/// Minimum lead one side needs over the other to leave HOLD.
const DECISION_MARGIN: f64 = 1.0;

/// Crossover threshold in percent.
const CROSSOVER_THRESHOLD_PCT: f64 = 0.1;

/// Outcome of scoring one indicator set.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub signal: SignalKind,
    pub strength: f64,
    pub reasons: Vec<&'static str>,
    pub buy_score: f64,
    pub sell_score: f64,
}

impl Classification {
    /// Comma-joined reasons in rule order.
    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            CONSOLIDATION_REASON.to_string()
        } else {
            self.reasons.join(", ")
        }
    }
}

/// Running buy/sell tally.
#[derive(Debug, Default)]
struct Scorecard {
    buy: f64,
    sell: f64,
    reasons: Vec<&'static str>,
}

impl Scorecard {
    fn buy(&mut self, points: f64, reason: &'static str) {
        self.buy += points;
        self.reasons.push(reason);
    }

    fn sell(&mut self, points: f64, reason: &'static str) {
        self.sell += points;
        self.reasons.push(reason);
    }
}

/// Score and classify `indicators` for `symbol`.
pub fn classify(symbol: &str, indicators: &IndicatorSet) -> Classification {
    let mut card = Scorecard::default();

    score_rsi(&mut card, indicators.rsi);
    score_trend(&mut card, indicators);
    score_crossover(&mut card, indicators);

    let drift = symbol_drift(symbol);
    let (signal, raw_strength) = if card.buy > card.sell + DECISION_MARGIN {
        (SignalKind::Buy, 75.0 + card.buy * 3.5 + drift)
    } else if card.sell > card.buy + DECISION_MARGIN {
        (SignalKind::Sell, 75.0 + card.sell * 3.5 + drift)
    } else {
        (SignalKind::Hold, 45.0 + (card.buy - card.sell).abs() * 5.0 + drift)
    };

    Classification {
        signal,
        strength: round2(raw_strength),
        reasons: card.reasons,
        buy_score: card.buy,
        sell_score: card.sell,
    }
}

/// RSI bands, first match wins.
fn score_rsi(card: &mut Scorecard, rsi: f64) {
    if rsi < 30.0 {
        card.buy(3.0 + (30.0 - rsi) / 10.0, "strong RSI oversold");
    } else if rsi < 45.0 {
        card.buy(1.0 + (45.0 - rsi) / 15.0, "RSI accumulation zone");
    } else if rsi > 70.0 {
        card.sell(3.0 + (rsi - 70.0) / 10.0, "strong RSI overbought");
    } else if rsi > 55.0 {
        card.sell(1.0 + (rsi - 55.0) / 15.0, "RSI exhaustion zone");
    }
}

/// SMA20 vs SMA50 with price confirmation.
fn score_trend(card: &mut Scorecard, ind: &IndicatorSet) {
    let Some(ma_diff) = pct_diff(ind.sma20, ind.sma50) else {
        return;
    };

    if ind.current_price > ind.sma20 && ma_diff > 0.0 {
        card.buy(2.0 + ma_diff.min(3.0), "confirmed uptrend");
    } else if ind.current_price < ind.sma20 && ma_diff < 0.0 {
        card.sell(2.0 + ma_diff.abs().min(3.0), "confirmed downtrend");
    }
}

/// EMA12 vs EMA26 distance.
fn score_crossover(card: &mut Scorecard, ind: &IndicatorSet) {
    let Some(ema_diff) = pct_diff(ind.ema12, ind.ema26) else {
        return;
    };

    if ema_diff > CROSSOVER_THRESHOLD_PCT {
        card.buy(1.5 + ema_diff, "fast MA crossover");
    } else if ema_diff < -CROSSOVER_THRESHOLD_PCT {
        card.sell(1.5 + ema_diff.abs(), "growing selling pressure");
    }
}

/// Percent distance of `value` from `base`. None when `base` is zero or the
/// result is not finite.
fn pct_diff(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let diff = (value - base) / base * 100.0;
    diff.is_finite().then_some(diff)
}

/// Deterministic per-symbol offset in `[0, 2)`.
///
/// Sum of UTF-16 code units, modulo 100, divided by 50.
pub fn symbol_drift(symbol: &str) -> f64 {
    let seed: u64 = symbol.encode_utf16().map(u64::from).sum();
    (seed % 100) as f64 / 50.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(rsi: f64, sma20: f64, sma50: f64, ema12: f64, ema26: f64, price: f64) -> IndicatorSet {
        IndicatorSet {
            rsi,
            sma20,
            sma50,
            ema12,
            ema26,
            current_price: price,
        }
    }

    #[test]
    fn test_symbol_drift() {
        // B=66 T=84 C=67 U=85 S=83 D=68 T=84 => 537 % 100 = 37
        assert!((symbol_drift("BTCUSDT") - 0.74).abs() < 1e-12);
        assert!((symbol_drift("A") - 1.3).abs() < 1e-12);
        assert_eq!(symbol_drift(""), 0.0);
        assert_eq!(symbol_drift("BTCUSDT"), symbol_drift("BTCUSDT"));
    }

    #[test]
    fn test_drift_range() {
        for symbol in ["BTCUSDT", "ETHUSDT", "PEPEUSDT", "zz", "€"] {
            let drift = symbol_drift(symbol);
            assert!((0.0..2.0).contains(&drift), "{} -> {}", symbol, drift);
        }
    }

    #[test]
    fn test_rsi_bands() {
        let neutral = |rsi| indicators(rsi, 100.0, 100.0, 100.0, 100.0, 100.0);

        let c = classify("", &neutral(20.0));
        assert_eq!(c.reasons, vec!["strong RSI oversold"]);
        assert!((c.buy_score - 4.0).abs() < 1e-12);

        let c = classify("", &neutral(30.0));
        assert_eq!(c.reasons, vec!["RSI accumulation zone"]);
        assert!((c.buy_score - 2.0).abs() < 1e-12);

        let c = classify("", &neutral(80.0));
        assert_eq!(c.reasons, vec!["strong RSI overbought"]);
        assert!((c.sell_score - 4.0).abs() < 1e-12);

        let c = classify("", &neutral(70.0));
        assert_eq!(c.reasons, vec!["RSI exhaustion zone"]);
        assert!((c.sell_score - 2.0).abs() < 1e-12);

        let c = classify("", &neutral(50.0));
        assert!(c.reasons.is_empty());
        assert_eq!(c.reason(), CONSOLIDATION_REASON);
    }

    #[test]
    fn test_band_edges_fall_through() {
        // 45 and 55 are outside both accumulation and exhaustion bands
        let c = classify("", &indicators(45.0, 1.0, 1.0, 1.0, 1.0, 1.0));
        assert!(c.reasons.is_empty());
        let c = classify("", &indicators(55.0, 1.0, 1.0, 1.0, 1.0, 1.0));
        assert!(c.reasons.is_empty());
    }

    #[test]
    fn test_trend_contribution_is_capped() {
        // maDiff = 10% => 2 + 3
        let c = classify("", &indicators(50.0, 110.0, 100.0, 100.0, 100.0, 120.0));
        assert_eq!(c.reasons, vec!["confirmed uptrend"]);
        assert!((c.buy_score - 5.0).abs() < 1e-12);

        // maDiff = -1% => 2 + 1
        let c = classify("", &indicators(50.0, 99.0, 100.0, 100.0, 100.0, 90.0));
        assert_eq!(c.reasons, vec!["confirmed downtrend"]);
        assert!((c.sell_score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_requires_price_confirmation() {
        // sma20 above sma50 but price below sma20
        let c = classify("", &indicators(50.0, 110.0, 100.0, 100.0, 100.0, 105.0));
        assert!(c.reasons.is_empty());
    }

    #[test]
    fn test_crossover_threshold() {
        let c = classify("", &indicators(50.0, 1.0, 1.0, 100.05, 100.0, 1.0));
        assert!(c.reasons.is_empty());

        let c = classify("", &indicators(50.0, 1.0, 1.0, 102.0, 100.0, 1.0));
        assert_eq!(c.reasons, vec!["fast MA crossover"]);
        assert!((c.buy_score - 3.5).abs() < 1e-9);

        let c = classify("", &indicators(50.0, 1.0, 1.0, 98.0, 100.0, 1.0));
        assert_eq!(c.reasons, vec!["growing selling pressure"]);
        assert!((c.sell_score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominators_contribute_nothing() {
        let c = classify("", &indicators(50.0, 5.0, 0.0, 5.0, 0.0, 10.0));
        assert!(c.reasons.is_empty());
        assert_eq!(c.buy_score, 0.0);
        assert_eq!(c.sell_score, 0.0);
        assert!(c.strength.is_finite());
    }

    #[test]
    fn test_decision_margin() {
        // buy = 2.0 (rsi 30), sell = 0 => BUY
        let c = classify("", &indicators(30.0, 1.0, 1.0, 1.0, 1.0, 1.0));
        assert_eq!(c.signal, SignalKind::Buy);
        assert!((c.strength - 82.0).abs() < 1e-9);

        // buy = 5 (uptrend), sell = 4 (rsi 80): a lead of exactly 1 is HOLD
        let c = classify("", &indicators(80.0, 110.0, 100.0, 100.0, 100.0, 120.0));
        assert_eq!(c.signal, SignalKind::Hold);
        assert!((c.strength - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_reasons_keep_rule_order() {
        let c = classify("", &indicators(80.0, 110.0, 100.0, 102.0, 100.0, 120.0));
        assert_eq!(
            c.reason(),
            "strong RSI overbought, confirmed uptrend, fast MA crossover"
        );
    }

    #[test]
    fn test_strength_is_not_capped() {
        let c = classify("", &indicators(5.0, 110.0, 100.0, 120.0, 100.0, 120.0));
        assert_eq!(c.signal, SignalKind::Buy);
        assert!(c.strength > 100.0);
    }

    #[test]
    fn test_strength_rounded_to_two_decimals() {
        let c = classify("BTCUSDT", &indicators(44.0, 1.0, 1.0, 1.0, 1.0, 1.0));
        let scaled = c.strength * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
