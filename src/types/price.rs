use serde::{Deserialize, Serialize};

/// Rolling 24h ticker snapshot for one trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    /// Unix milliseconds of the last update.
    pub updated_at: i64,
}

/// Market-data connection status reported to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub connected: bool,
    pub watchlist: Vec<String>,
    pub cached_symbols: usize,
    pub timestamp: i64,
}
