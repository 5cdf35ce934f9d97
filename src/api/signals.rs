//! Signal API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::signals::DEFAULT_HISTORY_LIMIT;
use crate::types::{Candle, MarketSummary, SignalResult};
use crate::AppState;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of most recent entries to return (default 50).
    pub limit: Option<usize>,
}

/// Body of the evaluate endpoint.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Candles ordered oldest first.
    pub candles: Vec<Candle>,
}

/// Accuracy heuristic response.
#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    pub accuracy: f64,
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_signals))
        .route("/summary", get(get_summary))
        .route("/accuracy", get(get_accuracy))
        .route("/history", get(get_history))
        .route("/:symbol", get(get_signal))
        .route("/:symbol/evaluate", post(evaluate))
}

/// Latest signal for every evaluated symbol.
async fn get_all_signals(State(state): State<AppState>) -> Json<ApiResponse<Vec<SignalResult>>> {
    Json(ApiResponse::list(state.engine.get_all_signals()))
}

/// Dashboard counters.
async fn get_summary(State(state): State<AppState>) -> Json<ApiResponse<MarketSummary>> {
    Json(ApiResponse::new(state.engine.summary()))
}

async fn get_accuracy(State(state): State<AppState>) -> Json<ApiResponse<AccuracyResponse>> {
    Json(ApiResponse::new(AccuracyResponse {
        accuracy: state.engine.calculate_accuracy(),
    }))
}

/// Most recent evaluations, oldest first.
async fn get_history(
    State(state): State<AppState>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<SignalResult>>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(ApiResponse::list(state.engine.get_history(limit))))
}

/// Latest signal for one symbol.
async fn get_signal(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<SignalResult>>> {
    let symbol = symbol.to_uppercase();
    let signal = state
        .engine
        .get_signal(&symbol)
        .ok_or_else(|| AppError::NotFound(format!("No signal available for {}", symbol)))?;

    Ok(Json(ApiResponse::new(signal)))
}

/// Evaluate caller-supplied candles for a symbol.
async fn evaluate(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    request: std::result::Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SignalResult>>> {
    let Json(request) = request?;
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("Symbol must not be empty".to_string()));
    }

    let result = state.engine.evaluate(&symbol, &request.candles);
    Ok(Json(ApiResponse::new(result)))
}
