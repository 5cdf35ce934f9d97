use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    tracked_symbols: usize,
    stream_connected: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tracked_symbols: state.engine.store().len(),
        stream_connected: state.price_cache.is_connected(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_health_reports_engine_and_stream() {
        let state = AppState::new(Config::default());
        let Json(response) = health(State(state)).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(response.tracked_symbols, 0);
        assert!(!response.stream_connected);
    }

    #[test]
    fn test_health_response_camel_case() {
        let response = HealthResponse {
            status: "ok",
            version: "0.1.0",
            tracked_symbols: 3,
            stream_connected: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"trackedSymbols\":3"));
        assert!(json.contains("\"streamConnected\":true"));
    }
}
