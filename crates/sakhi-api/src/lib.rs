//! HTTP API server for the Sakhi content platform
//!
//! Exposes content creation (laws, schemes), public browsing, manual review,
//! feedback, and session token endpoints over REST. Content creation kicks
//! off a background verification pass against an LLM oracle; clients observe
//! the verdict by polling the record.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod handlers;
pub mod session;

use crate::config::{ApiConfig, ConfigError};
use crate::handlers::{create_router, AppState};
use crate::session::SessionManager;
use sakhi_oracle::OllamaOracle;
use sakhi_store::{SqliteContentStore, StoreError};
use sakhi_workflow::VerificationWorkflow;
use std::sync::Arc;

/// Errors during server startup
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Could not bind the listen address
    #[error("Failed to bind address: {0}")]
    Bind(#[from] std::io::Error),

    /// Could not open the content store
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),
}

/// Start the API server and serve until shutdown
pub async fn start_server(config: ApiConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    let store = Arc::new(SqliteContentStore::new(&config.database_path)?);

    let oracle = Arc::new(
        OllamaOracle::new(&config.oracle.endpoint, &config.oracle.model)
            .with_max_retries(config.oracle.max_retries),
    );
    let workflow = VerificationWorkflow::new(Arc::clone(&store), oracle);
    let sessions = Arc::new(SessionManager::new(
        &config.jwt_secret,
        config.token_expiry_secs,
    ));

    let state = AppState {
        store,
        workflow,
        sessions,
    };
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, database = %config.database_path, "Sakhi API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
