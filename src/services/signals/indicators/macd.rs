//! Moving Average Convergence Divergence (MACD) indicator.

use serde::{Deserialize, Serialize};

use super::ema;

/// MACD line summary.
///
/// The signal line is not tracked (always 0), so `histogram` equals `macd`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSummary {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Fast EMA minus slow EMA over the full series.
pub fn macd(prices: &[f64], fast_period: usize, slow_period: usize) -> MacdSummary {
    let macd_line = ema(prices, fast_period) - ema(prices, slow_period);

    MacdSummary {
        macd: macd_line,
        signal: 0.0,
        histogram: macd_line,
    }
}
