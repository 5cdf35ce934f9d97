//! Technical indicator implementations.
//!
//! Every function takes closing prices ordered oldest first and degrades to a
//! defined fallback value instead of failing on short input.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::ema;
pub use macd::{macd, MacdSummary};
pub use rsi::{rsi, RSI_NEUTRAL, RSI_PERIOD};
pub use sma::sma;

use crate::types::IndicatorSet;

/// Compute the full indicator set used by the classifier.
pub fn indicator_set(prices: &[f64]) -> IndicatorSet {
    IndicatorSet {
        rsi: rsi(prices, RSI_PERIOD),
        sma20: sma(prices, 20),
        sma50: sma(prices, 50),
        ema12: ema(prices, 12),
        ema26: ema(prices, 26),
        current_price: prices.last().copied().unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_set_uses_standard_periods() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let set = indicator_set(&prices);

        assert_eq!(set.rsi, 100.0);
        assert_eq!(set.sma20, 139.5);
        assert_eq!(set.sma50, 124.5);
        assert!((set.ema12 - 143.5).abs() < 1e-9);
        assert!((set.ema26 - 136.5).abs() < 1e-9);
        assert_eq!(set.current_price, 149.0);
    }

    #[test]
    fn test_indicator_set_short_series_sma50_falls_back() {
        let prices: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        let set = indicator_set(&prices);
        assert_eq!(set.sma50, 39.0);
        assert_eq!(set.current_price, 39.0);
    }
}
