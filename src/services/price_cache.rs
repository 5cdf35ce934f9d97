use crate::types::TickerSnapshot;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Latest ticker snapshot per trading pair, fed by the market-data stream.
pub struct PriceCache {
    /// Snapshots keyed by uppercase pair (e.g. "BTCUSDT").
    tickers: DashMap<String, TickerSnapshot>,
    /// Whether the live stream is currently connected.
    connected: AtomicBool,
}

impl PriceCache {
    /// Create a new price cache.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store a snapshot, replacing any previous one for the pair.
    pub fn update(&self, ticker: TickerSnapshot) {
        self.tickers.insert(ticker.symbol.to_uppercase(), ticker);
    }

    /// Latest snapshot for `symbol`.
    pub fn get(&self, symbol: &str) -> Option<TickerSnapshot> {
        self.tickers
            .get(&symbol.to_uppercase())
            .map(|entry| entry.value().clone())
    }

    /// All snapshots sorted by symbol.
    pub fn all(&self) -> Vec<TickerSnapshot> {
        let mut tickers: Vec<TickerSnapshot> =
            self.tickers.iter().map(|entry| entry.value().clone()).collect();
        tickers.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        tickers
    }

    /// Record the stream connection state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// Whether the stream is connected.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Number of cached symbols.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self {
            tickers: DashMap::new(),
            connected: AtomicBool::new(false),
        }
    }
}
