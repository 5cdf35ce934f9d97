//! Ozneh - cryptocurrency trading signal engine and dashboard API

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{PriceCache, SignalEngine};
use sources::BinanceClient;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<SignalEngine>,
    pub price_cache: Arc<PriceCache>,
    pub binance: BinanceClient,
}

impl AppState {
    /// Build the shared components for one server session.
    pub fn new(config: Config) -> Self {
        let engine = SignalEngine::new(config.history_capacity);
        let binance = BinanceClient::new(config.binance_api_url.clone());

        Self {
            config: Arc::new(config),
            engine,
            price_cache: PriceCache::new(),
            binance,
        }
    }
}

// Re-export commonly used types
pub use services::signals::indicators;
pub use types::*;
