pub mod statistics;
pub mod transactions;

use crate::domain::{Statistics, Transaction, TransactionRequest};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub store: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        transactions::create_transaction,
        transactions::list_transactions,
        transactions::get_transaction,
        transactions::delete_transactions,
        transactions::delete_transaction,
        statistics::recent_statistics,
    ),
    components(schemas(Transaction, TransactionRequest, Statistics, HealthStatus)),
    tags(
        (name = "Transactions", description = "Transaction ledger"),
        (name = "Statistics", description = "Rolling one-minute statistics"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus),
        (status = 503, description = "Transaction store is unreachable", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (status_code, status, store) = match state.repository.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the transaction store");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
        }
    };

    let body = HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
    };

    (status_code, Json(body))
}

pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
