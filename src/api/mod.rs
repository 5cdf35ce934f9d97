pub mod health;
pub mod market;
pub mod signals;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta {
                timestamp: chrono::Utc::now().timestamp_millis(),
                count: None,
            },
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wrap a list, reporting its length in `meta.count`.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        let mut response = Self::new(data);
        response.meta.count = Some(count);
        response
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/signals", signals::router())
        .nest("/api/market", market::router())
}
