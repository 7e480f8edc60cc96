pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod utils;
pub mod validation;

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::adapters::{InMemoryTransactionRepository, PostgresTransactionRepository};
use crate::config::Config;
use crate::ports::TransactionRepository;
use crate::services::{StatisticsService, TransactionManager};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TransactionRepository>,
    pub transactions: TransactionManager,
    pub statistics: StatisticsService,
}

impl AppState {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self {
            transactions: TransactionManager::new(repository.clone()),
            statistics: StatisticsService::new(repository.clone()),
            repository,
        }
    }
}

/// Picks the transaction store from configuration: Postgres when `DATABASE_URL`
/// is set (migrations are applied), memory otherwise.
pub async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn TransactionRepository>> {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url, config.database_max_connections).await?;
            db::run_migrations(&pool, db::MIGRATIONS_DIR).await?;
            tracing::info!("Using Postgres transaction store");
            Ok(Arc::new(PostgresTransactionRepository::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, transactions are kept in memory only");
            Ok(Arc::new(InMemoryTransactionRepository::new()))
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi))
        .route(
            "/transaction",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction)
                .delete(handlers::transactions::delete_transactions),
        )
        .route(
            "/transaction/:id",
            get(handlers::transactions::get_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        .route("/statistics", get(handlers::statistics::recent_statistics))
        // path used by earlier clients
        .route("/estatistics", get(handlers::statistics::recent_statistics))
        .layer(axum::middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .with_state(state)
}

pub fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match &config.cors_allowed_origins {
        None => Ok(layer.allow_origin(Any)),
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| HeaderValue::from_str(origin))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(layer.allow_origin(origins))
        }
    }
}
