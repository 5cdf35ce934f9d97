//! Exponential Moving Average (EMA) indicator.

/// EMA over the whole series.
///
/// Seeded with the SMA of the first `period` prices, then smoothed with
/// multiplier `2 / (period + 1)` over the remaining prices in order.
/// Empty series yields 0; a series shorter than `period` yields its last price.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    let Some(&last) = prices.last() else {
        return 0.0;
    };

    if period == 0 || prices.len() < period {
        return last;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let seed = prices.iter().take(period).sum::<f64>() / period as f64;

    prices
        .iter()
        .skip(period)
        .fold(seed, |ema, &price| (price - ema) * multiplier + ema)
}
