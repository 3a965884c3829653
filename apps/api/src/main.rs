//! Folio API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use folio_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_services::{build_app_state, build_in_memory_app_state, connect_and_migrate};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app_state = match config.database.as_ref() {
        Some(database) => {
            let pool = connect_and_migrate(database).await?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            build_app_state(pool, &config).await?
        }
        None => {
            info!("DATABASE_URL not set; using in-memory adapters");
            build_in_memory_app_state(&config).await?
        }
    };

    if app_state.actor_resolver.is_mock() {
        warn!("mock identity is active; every request acts as the configured actor");
    }

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "folio-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
