use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    /// True for BUY and SELL.
    pub fn is_active(&self) -> bool {
        !matches!(self, SignalKind::Hold)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
            SignalKind::Hold => write!(f, "HOLD"),
        }
    }
}

/// Indicator values computed from one closing-price snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub rsi: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub current_price: f64,
}

/// Result of one signal evaluation for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalResult {
    pub symbol: String,
    pub signal: SignalKind,
    /// Confidence score. Not clamped, can exceed 100.
    pub strength: f64,
    pub reason: String,
    /// Absent only on the insufficient-data result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSet>,
    /// Unix milliseconds.
    pub timestamp: i64,
}

/// Reason reported when fewer candles than required were supplied.
pub const INSUFFICIENT_DATA_REASON: &str = "Insufficient data";

impl SignalResult {
    /// HOLD result returned when there is not enough history to score.
    pub fn insufficient(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            signal: SignalKind::Hold,
            strength: 0.0,
            reason: INSUFFICIENT_DATA_REASON.to_string(),
            indicators: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Overall market mood derived from the active signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketTrend {
    /// Compare BUY and SELL counts.
    pub fn from_counts(buys: usize, sells: usize) -> Self {
        if buys > sells {
            MarketTrend::Bullish
        } else if sells > buys {
            MarketTrend::Bearish
        } else {
            MarketTrend::Neutral
        }
    }
}

/// Dashboard statistics over the latest signal per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub active_signals: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    pub accuracy: f64,
    pub trend: MarketTrend,
    pub timestamp: i64,
}
