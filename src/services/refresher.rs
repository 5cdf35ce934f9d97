//! Periodic signal refresh for the watchlist.

use crate::services::signals::SignalEngine;
use crate::services::PriceCache;
use crate::sources::BinanceClient;
use crate::types::{KlineInterval, SignalResult, INSUFFICIENT_DATA_REASON};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Counters from one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Symbols scored and recorded.
    pub evaluated: usize,
    /// Symbols that returned too few candles.
    pub insufficient: usize,
    /// Symbols whose candle fetch failed.
    pub failed: usize,
}

impl RefreshReport {
    fn record(&mut self, result: &SignalResult) {
        if result.indicators.is_none() && result.reason == INSUFFICIENT_DATA_REASON {
            self.insufficient += 1;
        } else {
            self.evaluated += 1;
        }
    }
}

/// Fetches candles for each watchlist symbol and feeds them to the engine.
pub struct SignalRefresher {
    engine: Arc<SignalEngine>,
    client: BinanceClient,
    price_cache: Arc<PriceCache>,
    watchlist: Vec<String>,
    kline_interval: KlineInterval,
    kline_limit: u16,
}

impl SignalRefresher {
    /// Create a new refresher.
    pub fn new(
        engine: Arc<SignalEngine>,
        client: BinanceClient,
        price_cache: Arc<PriceCache>,
        watchlist: Vec<String>,
        kline_interval: KlineInterval,
        kline_limit: u16,
    ) -> Self {
        Self {
            engine,
            client,
            price_cache,
            watchlist,
            kline_interval,
            kline_limit,
        }
    }

    /// Run refresh passes forever, one every `period`.
    pub async fn run(&self, period: Duration) {
        info!(
            "Starting signal refresh for {} symbols every {:?}",
            self.watchlist.len(),
            period
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.refresh_tickers().await;
            let report = self.refresh_once().await;
            info!(
                "Signal refresh: {} evaluated, {} insufficient, {} failed",
                report.evaluated, report.insufficient, report.failed
            );
        }
    }

    /// Evaluate every watchlist symbol once.
    pub async fn refresh_once(&self) -> RefreshReport {
        let mut report = RefreshReport::default();

        for symbol in &self.watchlist {
            match self
                .client
                .get_klines(symbol, self.kline_interval, self.kline_limit)
                .await
            {
                Ok(candles) => {
                    let result = self.engine.evaluate(symbol, &candles);
                    report.record(&result);
                }
                Err(e) => {
                    warn!("Failed to fetch klines for {}: {}", symbol, e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Seed the price cache with 24h tickers for the watchlist.
    pub async fn refresh_tickers(&self) -> usize {
        match self.client.get_tickers(&self.watchlist).await {
            Ok(tickers) => {
                let count = tickers.len();
                for ticker in tickers {
                    self.price_cache.update(ticker);
                }
                debug!("Refreshed {} tickers", count);
                count
            }
            Err(e) => {
                warn!("Failed to fetch tickers: {}", e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalKind;

    #[test]
    fn test_report_counts_insufficient_separately() {
        let mut report = RefreshReport::default();
        report.record(&SignalResult::insufficient("BTCUSDT"));

        let mut scored = SignalResult::insufficient("ETHUSDT");
        scored.signal = SignalKind::Buy;
        scored.reason = "fast MA crossover".to_string();
        report.record(&scored);

        assert_eq!(
            report,
            RefreshReport {
                evaluated: 1,
                insufficient: 1,
                failed: 0
            }
        );
    }

    #[test]
    fn test_unreachable_source_counts_failures() {
        let engine = SignalEngine::new(10);
        let refresher = SignalRefresher::new(
            engine.clone(),
            BinanceClient::new("http://127.0.0.1:1"),
            PriceCache::new(),
            vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            KlineInterval::OneHour,
            50,
        );

        let report = tokio_test::block_on(refresher.refresh_once());
        assert_eq!(report.failed, 2);
        assert_eq!(report.evaluated, 0);
        assert!(engine.get_all_signals().is_empty());
    }
}
