use ozneh::config::Config;
use ozneh::services::SignalRefresher;
use ozneh::sources::BinanceWs;
use ozneh::{api, AppState};
use tokio::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ozneh=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Starting Ozneh server on {}:{} ({} symbols, {} candles @ {})",
        config.host,
        config.port,
        config.watchlist.len(),
        config.kline_limit,
        config.kline_interval.as_str()
    );

    let state = AppState::new(config);
    let config = state.config.clone();

    // Live ticker stream
    if config.enable_price_stream {
        let ws = BinanceWs::new(
            config.binance_ws_url.clone(),
            config.watchlist.clone(),
            state.price_cache.clone(),
        );
        tokio::spawn(async move {
            if let Err(e) = ws.connect().await {
                tracing::error!("Binance WebSocket error: {}", e);
            }
        });
    }

    // Periodic signal evaluation
    {
        let refresher = SignalRefresher::new(
            state.engine.clone(),
            state.binance.clone(),
            state.price_cache.clone(),
            config.watchlist.clone(),
            config.kline_interval,
            config.kline_limit,
        );
        let period = Duration::from_secs(config.refresh_interval_secs);
        tokio::spawn(async move {
            refresher.run(period).await;
        });
    }

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Ozneh server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
