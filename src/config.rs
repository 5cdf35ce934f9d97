use crate::services::signals::DEFAULT_HISTORY_CAPACITY;
use crate::sources::binance::BINANCE_API_URL;
use crate::sources::binance_ws::BINANCE_WS_URL;
use crate::types::KlineInterval;
use std::env;

/// Default watchlist tracked by the dashboard.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "XRPUSDT", "SOLUSDT",
    "ADAUSDT", "DOTUSDT", "AVAXUSDT", "LINKUSDT", "POLUSDT",
    "TRXUSDT", "LTCUSDT", "USDCUSDT", "ARBUSDT", "APTUSDT",
    "NEARUSDT", "ICPUSDT", "RENDERUSDT", "SHIBUSDT", "PEPEUSDT",
    "TAOUSDT", "FTMUSDT", "ATOMUSDT", "ALGOUSDT", "XTZUSDT",
    "EOSUSDT", "HNTUSDT", "TONUSDT", "ZECUSDT", "DOGEUSDT",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Binance REST base URL.
    pub binance_api_url: String,
    /// Binance WebSocket base URL.
    pub binance_ws_url: String,
    /// Trading pairs evaluated by the refresher and streamed live.
    pub watchlist: Vec<String>,
    /// Candle interval fetched for evaluation.
    pub kline_interval: KlineInterval,
    /// Number of candles fetched per evaluation.
    pub kline_limit: u16,
    /// Seconds between signal refresh passes.
    pub refresh_interval_secs: u64,
    /// Maximum number of signal history entries retained.
    pub history_capacity: usize,
    /// Whether to open the live ticker stream.
    pub enable_price_stream: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let watchlist = env::var("WATCHLIST")
            .ok()
            .map(|s| parse_watchlist(&s))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_watchlist);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            binance_api_url: env::var("BINANCE_API_URL")
                .unwrap_or_else(|_| BINANCE_API_URL.to_string()),
            binance_ws_url: env::var("BINANCE_WS_URL")
                .unwrap_or_else(|_| BINANCE_WS_URL.to_string()),
            watchlist,
            kline_interval: env::var("KLINE_INTERVAL")
                .ok()
                .and_then(|v| KlineInterval::from_str(&v))
                .unwrap_or_default(),
            kline_limit: env::var("KLINE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            refresh_interval_secs: env::var("SIGNAL_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(60),
            history_capacity: env::var("SIGNAL_HISTORY_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_CAPACITY),
            enable_price_stream: env::var("ENABLE_PRICE_STREAM")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            binance_api_url: BINANCE_API_URL.to_string(),
            binance_ws_url: BINANCE_WS_URL.to_string(),
            watchlist: default_watchlist(),
            kline_interval: KlineInterval::OneHour,
            kline_limit: 50,
            refresh_interval_secs: 60,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            enable_price_stream: true,
        }
    }
}

fn default_watchlist() -> Vec<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}

/// Parse a comma-separated watchlist, uppercasing and dropping blanks.
pub fn parse_watchlist(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_uppercase())
        .filter(|item| !item.is_empty())
        .collect()
}
