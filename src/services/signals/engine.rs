//! Signal engine: evaluates candles and answers queries over the results.

use crate::services::signals::accuracy::{calculate_accuracy, summarize};
use crate::services::signals::classifier::classify;
use crate::services::signals::indicators::indicator_set;
use crate::services::signals::store::SignalStore;
use crate::types::{close_prices, Candle, MarketSummary, SignalResult};
use std::sync::Arc;
use tracing::debug;

/// Minimum number of candles required to score a symbol.
pub const MIN_CANDLES: usize = 30;

/// Default number of entries returned by [`SignalEngine::get_history`].
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Computes trading signals and keeps the latest result per symbol.
///
/// Created once at startup and shared by `Arc` with whatever needs to read or
/// write signals.
#[derive(Debug, Default)]
pub struct SignalEngine {
    store: SignalStore,
}

impl SignalEngine {
    /// Create an engine whose history keeps at most `history_capacity` entries.
    pub fn new(history_capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            store: SignalStore::new(history_capacity),
        })
    }

    /// Evaluate `candles` for `symbol` and record the result.
    ///
    /// Fewer than [`MIN_CANDLES`] candles yields an insufficient-data HOLD
    /// that is returned without being stored.
    pub fn evaluate(&self, symbol: &str, candles: &[Candle]) -> SignalResult {
        if candles.len() < MIN_CANDLES {
            debug!(
                "Insufficient data for {}: {} candles (need {})",
                symbol,
                candles.len(),
                MIN_CANDLES
            );
            return SignalResult::insufficient(symbol);
        }

        let prices = close_prices(candles);
        let indicators = indicator_set(&prices);
        let classification = classify(symbol, &indicators);

        let result = SignalResult {
            symbol: symbol.to_string(),
            signal: classification.signal,
            strength: classification.strength,
            reason: classification.reason(),
            indicators: Some(indicators),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        debug!(
            "{} -> {} ({:.2}) buy={:.2} sell={:.2} rsi={:.2}",
            symbol,
            result.signal,
            result.strength,
            classification.buy_score,
            classification.sell_score,
            indicators.rsi
        );

        self.store.record(result.clone());
        result
    }

    /// Latest result for `symbol`, if it was ever evaluated.
    pub fn get_signal(&self, symbol: &str) -> Option<SignalResult> {
        self.store.get(symbol)
    }

    /// Latest result per symbol, in order of first evaluation.
    pub fn get_all_signals(&self) -> Vec<SignalResult> {
        self.store.all()
    }

    /// The most recent `limit` evaluations, oldest first.
    pub fn get_history(&self, limit: usize) -> Vec<SignalResult> {
        self.store.history(limit)
    }

    /// Average strength of the latest active signals.
    pub fn calculate_accuracy(&self) -> f64 {
        calculate_accuracy(&self.store.all())
    }

    /// Dashboard counters over the latest signals.
    pub fn summary(&self) -> MarketSummary {
        summarize(&self.store.all())
    }

    /// Underlying store.
    pub fn store(&self) -> &SignalStore {
        &self.store
    }
}
