use crate::types::{Candle, KlineInterval, TickerSnapshot};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// Upper bound Binance accepts for the `limit` kline parameter.
pub const MAX_KLINE_LIMIT: u16 = 1000;

/// Binance 24hr ticker response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTicker {
    symbol: String,
    last_price: String,
    price_change: String,
    price_change_percent: String,
    high_price: String,
    low_price: String,
    volume: String,
    close_time: Option<i64>,
}

impl BinanceTicker {
    fn into_snapshot(self) -> TickerSnapshot {
        TickerSnapshot {
            symbol: self.symbol,
            price: parse_decimal(&self.last_price),
            change: parse_decimal(&self.price_change),
            change_percent: parse_decimal(&self.price_change_percent),
            high: parse_decimal(&self.high_price),
            low: parse_decimal(&self.low_price),
            volume: parse_decimal(&self.volume),
            updated_at: self
                .close_time
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
        }
    }
}

/// Binance REST client for candles and tickers.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    /// Create a new Binance client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("Ozneh/1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the last `limit` candles for `symbol`, oldest first.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u16,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!("{}/klines", self.base_url);
        let limit = limit.clamp(1, MAX_KLINE_LIMIT).to_string();
        let symbol = symbol.to_uppercase();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let rows: Vec<Vec<Value>> = Self::json_or_error(response).await?;
        let candles = parse_klines(&rows);

        debug!("Fetched {} {} klines for {}", candles.len(), interval.as_str(), symbol);
        Ok(candles)
    }

    /// Fetch the 24h ticker for one symbol.
    pub async fn get_24h_ticker(&self, symbol: &str) -> anyhow::Result<TickerSnapshot> {
        let url = format!("{}/ticker/24hr", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.to_uppercase())])
            .send()
            .await?;

        let ticker: BinanceTicker = Self::json_or_error(response).await?;
        Ok(ticker.into_snapshot())
    }

    /// Fetch 24h tickers for several symbols in one request.
    pub async fn get_tickers(&self, symbols: &[String]) -> anyhow::Result<Vec<TickerSnapshot>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/ticker/24hr", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols_param(symbols))])
            .send()
            .await?;

        let tickers: Vec<BinanceTicker> = Self::json_or_error(response).await?;
        Ok(tickers.into_iter().map(BinanceTicker::into_snapshot).collect())
    }

    async fn json_or_error<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> anyhow::Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let excerpt: String = text.chars().take(200).collect();
            warn!("Binance API returned {}: {}", status, excerpt);
            return Err(anyhow::anyhow!("Binance API error: {}", status));
        }
        Ok(response.json().await?)
    }
}

/// JSON array parameter used by the multi-symbol ticker endpoint.
fn symbols_param(symbols: &[String]) -> String {
    let quoted: Vec<String> = symbols
        .iter()
        .map(|s| format!("\"{}\"", s.to_uppercase()))
        .collect();
    format!("[{}]", quoted.join(","))
}

/// Parse kline rows, skipping malformed ones.
pub fn parse_klines(rows: &[Vec<Value>]) -> Vec<Candle> {
    rows.iter().filter_map(|row| parse_kline_row(row)).collect()
}

/// Parse one kline row: `[openTime, open, high, low, close, volume, ...]`.
///
/// Prices arrive as decimal strings.
pub fn parse_kline_row(row: &[Value]) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }

    Some(Candle {
        time: row[0].as_i64()?,
        open: value_to_f64(&row[1])?,
        high: value_to_f64(&row[2])?,
        low: value_to_f64(&row[3])?,
        close: value_to_f64(&row[4])?,
        volume: value_to_f64(&row[5])?,
    })
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> f64 {
    s.parse().unwrap_or(0.0)
}
