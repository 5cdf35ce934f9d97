use crate::services::PriceCache;
use crate::types::TickerSnapshot;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

pub const BINANCE_WS_URL: &str = "wss://stream.binance.com:9443";

/// Delay before reconnecting after a disconnect.
const RECONNECT_DELAY_SECS: u64 = 5;

/// Combined-stream wrapper: `{"stream": "...", "data": {...}}`.
#[derive(Debug, Deserialize)]
struct StreamEnvelope {
    data: WsTicker,
}

/// 24hr rolling ticker event.
#[derive(Debug, Deserialize)]
struct WsTicker {
    #[serde(rename = "E")]
    event_time: Option<i64>,
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "c")]
    last_price: String,
    #[serde(rename = "p")]
    price_change: String,
    #[serde(rename = "P")]
    price_change_percent: String,
    #[serde(rename = "h")]
    high_price: String,
    #[serde(rename = "l")]
    low_price: String,
    #[serde(rename = "v")]
    volume: String,
}

impl WsTicker {
    fn into_snapshot(self) -> TickerSnapshot {
        let parse = |s: &str| s.parse::<f64>().unwrap_or(0.0);
        TickerSnapshot {
            price: parse(&self.last_price),
            change: parse(&self.price_change),
            change_percent: parse(&self.price_change_percent),
            high: parse(&self.high_price),
            low: parse(&self.low_price),
            volume: parse(&self.volume),
            updated_at: self
                .event_time
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            symbol: self.symbol,
        }
    }
}

/// Decode a ticker message, accepting both combined and raw stream payloads.
fn parse_ticker_message(text: &str) -> Option<TickerSnapshot> {
    if let Ok(envelope) = serde_json::from_str::<StreamEnvelope>(text) {
        return Some(envelope.data.into_snapshot());
    }
    serde_json::from_str::<WsTicker>(text)
        .ok()
        .map(WsTicker::into_snapshot)
}

/// Combined ticker stream URL for `symbols`.
fn stream_url(base_url: &str, symbols: &[String]) -> String {
    let streams: Vec<String> = symbols
        .iter()
        .map(|s| format!("{}@ticker", s.to_lowercase()))
        .collect();
    format!(
        "{}/stream?streams={}",
        base_url.trim_end_matches('/'),
        streams.join("/")
    )
}

/// Binance WebSocket ticker stream client.
#[derive(Clone)]
pub struct BinanceWs {
    base_url: String,
    symbols: Vec<String>,
    price_cache: Arc<PriceCache>,
}

impl BinanceWs {
    /// Create a new Binance WebSocket client.
    pub fn new(base_url: impl Into<String>, symbols: Vec<String>, price_cache: Arc<PriceCache>) -> Self {
        Self {
            base_url: base_url.into(),
            symbols,
            price_cache,
        }
    }

    /// Connect and keep receiving ticker updates, reconnecting on failure.
    pub async fn connect(&self) -> anyhow::Result<()> {
        if self.symbols.is_empty() {
            warn!("Binance WebSocket has no symbols to stream");
            return Ok(());
        }

        loop {
            match self.run_connection().await {
                Ok(_) => {
                    warn!("Binance WebSocket disconnected, reconnecting...");
                }
                Err(e) => {
                    error!("Binance WebSocket error: {}, reconnecting...", e);
                }
            }
            self.price_cache.set_connected(false);
            tokio::time::sleep(tokio::time::Duration::from_secs(RECONNECT_DELAY_SECS)).await;
        }
    }

    async fn run_connection(&self) -> anyhow::Result<()> {
        let url = stream_url(&self.base_url, &self.symbols);
        info!("Connecting to Binance WebSocket ({} streams)", self.symbols.len());

        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let (mut write, mut read) = ws_stream.split();
        self.price_cache.set_connected(true);
        info!("Connected to Binance WebSocket");

        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => self.handle_message(&text),
                Ok(Message::Ping(data)) => {
                    let _ = write.send(Message::Pong(data)).await;
                }
                Ok(Message::Close(_)) => {
                    info!("Binance WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("Binance WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_message(&self, text: &str) {
        match parse_ticker_message(text) {
            Some(ticker) if ticker.price > 0.0 => {
                debug!("Binance ticker: {} = {}", ticker.symbol, ticker.price);
                self.price_cache.update(ticker);
            }
            Some(_) => {}
            None => debug!("Ignoring unrecognized Binance message"),
        }
    }
}
