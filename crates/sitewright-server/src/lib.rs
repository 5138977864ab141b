//! Sitewright Server
//!
//! HTTP front end for the generation pipeline.
//!
//! # Endpoints
//!
//! - `POST /api/generate` with `{prompt, styleHints?}` returns
//!   `{success, content, id}` or `{error, details?, rawContent?}`
//! - `GET /api/content/:id` returns a stored document (`latest` for the newest)
//! - `GET /health` reports model and storage mode

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use sitewright_generator::Generator;
use sitewright_llm::{HttpTransport, LlmError, ModelInvoker};
use sitewright_store::{ConfiguredStore, StoreError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// HTTP client could not be built
    #[error("Model client error: {0}")]
    Model(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build application state from configuration
pub fn build_state(
    config: &ServerConfig,
) -> Result<AppState<ModelInvoker<HttpTransport>>, ServerError> {
    let invoker = ModelInvoker::from_config(config.model.clone(), config.retry)?;
    let store = ConfiguredStore::open(&config.storage)?;
    let storage_mode = store.mode();

    Ok(AppState {
        generator: Arc::new(Generator::new(invoker, store, config.generator.clone())),
        storage_mode,
    })
}

/// Start the HTTP server
///
/// Opens the store, builds the model client and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Sitewright server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} at {}", config.model.model, config.model.endpoint);
    info!(
        "Storage: {} ({})",
        config.storage.path.display(),
        config.storage.mode
    );
    if !config.model.has_token() {
        warn!("No model token configured; generation requests will be rejected");
    }

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
