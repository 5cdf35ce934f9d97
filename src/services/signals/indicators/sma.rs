//! Simple Moving Average (SMA) indicator.

/// Arithmetic mean of the last `period` prices.
///
/// When the series is shorter than `period` the most recent price is returned
/// unchanged. An empty series yields 0.
pub fn sma(prices: &[f64], period: usize) -> f64 {
    let Some(&last) = prices.last() else {
        return 0.0;
    };

    if period == 0 || prices.len() < period {
        return last;
    }

    prices[prices.len() - period..].iter().sum::<f64>() / period as f64
}
