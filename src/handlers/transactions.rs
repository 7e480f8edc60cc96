use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::domain::{Transaction, TransactionRequest};
use crate::error::AppError;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/transaction",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = Transaction),
        (status = 400, description = "Malformed request body"),
        (status = 409, description = "A transaction with this id already exists"),
        (status = 422, description = "Missing fields, non-positive value or future date")
    ),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = state.transactions.create(request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/transaction",
    responses((status = 200, description = "All stored transactions", body = [Transaction])),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = state.transactions.list_all().await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/transaction/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction found", body = Transaction),
        (status = 404, description = "Transaction not found")
    ),
    tag = "Transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state.transactions.get_by_id(&id).await?;
    Ok(Json(tx))
}

#[utoipa::path(
    delete,
    path = "/transaction",
    responses((status = 200, description = "All transactions deleted")),
    tag = "Transactions"
)]
pub async fn delete_transactions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.transactions.delete_all().await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/transaction/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    ),
    tag = "Transactions"
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.transactions.delete_by_id(&id).await?;
    Ok(StatusCode::OK)
}
