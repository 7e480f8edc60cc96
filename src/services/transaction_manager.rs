use chrono::Utc;
use std::sync::Arc;

use crate::domain::{Transaction, TransactionRequest};
use crate::error::AppError;
use crate::ports::TransactionRepository;
use crate::validation::validate_transaction;

/// Create, read and delete operations over the transaction store.
#[derive(Clone)]
pub struct TransactionManager {
    repository: Arc<dyn TransactionRepository>,
}

impl TransactionManager {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    /// Validate the request and persist it under the caller-supplied id.
    /// Nothing reaches the store when validation fails.
    pub async fn create(&self, request: TransactionRequest) -> Result<Transaction, AppError> {
        let tx = validate_transaction(&request, Utc::now()).map_err(|e| {
            tracing::warn!(id = ?request.id, reason = %e, "Rejected transaction");
            AppError::from(e)
        })?;

        let created = self.repository.insert(&tx).await?;
        tracing::info!(id = %created.id, value = %created.value, "Transaction recorded");

        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Transaction>, AppError> {
        let transactions = self.repository.find_all().await?;
        tracing::debug!(count = transactions.len(), "Listed transactions");
        Ok(transactions)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Transaction, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::transaction_not_found)
    }

    pub async fn delete_all(&self) -> Result<(), AppError> {
        self.repository.delete_all().await?;
        tracing::info!("All transactions deleted");
        Ok(())
    }

    /// Looks the record up first so a miss reports the same `NotFound` as `get_by_id`.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let existing = self.get_by_id(id).await?;
        self.repository.delete_by_id(&existing.id).await?;
        tracing::info!(id = %existing.id, "Transaction deleted");
        Ok(())
    }
}
