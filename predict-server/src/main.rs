//! Accident Severity Prediction Server
//!
//! Serves the trained severity model over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               SEVERITY SERVER                    │
//! ├──────────────────────────────────────────────────┤
//! │  ┌───────────┐     ┌──────────────────────────┐  │
//! │  │  API      │────▶│  PredictionService       │  │
//! │  │  (Axum)   │     │  (loaded once, Arc)      │  │
//! │  └───────────┘     └────────────┬─────────────┘  │
//! │                                 ▼                │
//! │                    ┌──────────────────────────┐  │
//! │                    │ model.json + .sha256     │  │
//! │                    └──────────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use severity_core::logic::model::{ModelMeta, PredictionService};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Accident Severity Server starting ({})...", config.environment);

    // Load model; serving without one is pointless
    let predictor = PredictionService::load(&config.model_path).with_context(|| {
        format!(
            "failed to load model from {} (run `severity train` first)",
            config.model_path.display()
        )
    })?;
    tracing::info!("Model loaded, classes: {}", predictor.classes().join(", "));

    let meta = ModelMeta::load_optional(&config.meta_path);

    // Build application state
    let state = AppState {
        predictor: Some(Arc::new(predictor)),
        meta: meta.map(Arc::new),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "severity_server=debug,severity_core=info,tower_http=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Option<Arc<PredictionService>>,
    pub meta: Option<Arc<ModelMeta>>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
