//! Market data endpoints backed by the price cache and the Binance client.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::error::{AppError, Result};
use crate::types::{Candle, KlineInterval, MarketStatus, TickerSnapshot};
use crate::AppState;

/// Query parameters for the klines endpoint.
#[derive(Debug, Deserialize)]
pub struct KlinesQuery {
    /// Interval notation ("1m", "1h", ...). Defaults to the configured interval.
    pub interval: Option<String>,
    /// Number of candles. Defaults to the configured limit.
    pub limit: Option<u16>,
}

/// Create the market router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/status", get(get_status))
        .route("/:symbol/price", get(get_price))
        .route("/:symbol/klines", get(get_klines))
}

/// Cached ticker snapshots.
async fn get_prices(State(state): State<AppState>) -> Json<ApiResponse<Vec<TickerSnapshot>>> {
    Json(ApiResponse::list(state.price_cache.all()))
}

/// Stream connection status and watchlist.
async fn get_status(State(state): State<AppState>) -> Json<ApiResponse<MarketStatus>> {
    Json(ApiResponse::new(MarketStatus {
        connected: state.price_cache.is_connected(),
        watchlist: state.config.watchlist.clone(),
        cached_symbols: state.price_cache.len(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}

async fn get_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<TickerSnapshot>>> {
    let ticker = state
        .price_cache
        .get(&symbol)
        .ok_or_else(|| AppError::NotFound(format!("No price cached for {}", symbol)))?;

    Ok(Json(ApiResponse::new(ticker)))
}

/// Candles fetched from Binance.
async fn get_klines(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    query: std::result::Result<Query<KlinesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Candle>>>> {
    let Query(query) = query?;
    let interval = resolve_interval(query.interval.as_deref(), state.config.kline_interval)?;
    let limit = query.limit.unwrap_or(state.config.kline_limit);

    let candles = state
        .binance
        .get_klines(&symbol, interval, limit)
        .await
        .map_err(|e| AppError::ExternalApi(e.to_string()))?;

    Ok(Json(ApiResponse::list(candles)))
}

fn resolve_interval(raw: Option<&str>, default: KlineInterval) -> Result<KlineInterval> {
    match raw {
        None => Ok(default),
        Some(s) => KlineInterval::from_str(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported interval: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_klines_query_parsing() {
        let query: KlinesQuery = serde_urlencoded::from_str("interval=4h&limit=100").unwrap();
        assert_eq!(query.interval.as_deref(), Some("4h"));
        assert_eq!(query.limit, Some(100));

        let query: KlinesQuery = serde_urlencoded::from_str("").unwrap();
        assert!(query.interval.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_resolve_interval() {
        assert_eq!(
            resolve_interval(None, KlineInterval::OneHour).unwrap(),
            KlineInterval::OneHour
        );
        assert_eq!(
            resolve_interval(Some("1d"), KlineInterval::OneHour).unwrap(),
            KlineInterval::OneDay
        );
        assert!(matches!(
            resolve_interval(Some("7x"), KlineInterval::OneHour),
            Err(AppError::BadRequest(_))
        ));
    }
}
