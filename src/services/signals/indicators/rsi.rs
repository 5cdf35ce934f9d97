//! Relative Strength Index (RSI) indicator.

/// Default RSI lookback.
pub const RSI_PERIOD: usize = 14;

/// Neutral RSI reported when there is not enough history.
pub const RSI_NEUTRAL: f64 = 50.0;

/// RSI with Wilder smoothing.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Returns 50 when fewer than `period + 1` prices are available and 100 when
/// the smoothed average loss is exactly zero.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let period_f = period as f64;
    let mut deltas = prices.windows(2).map(|w| w[1] - w[0]);

    // Calculate initial averages
    let (gains, losses) = deltas
        .by_ref()
        .take(period)
        .fold((0.0, 0.0), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l + change.abs())
            }
        });

    let mut avg_gain = gains / period_f;
    let mut avg_loss = losses / period_f;

    // Smooth over the remaining deltas
    for change in deltas {
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { change.abs() } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
