//! In-memory implementation of TransactionRepository.
//! Used when no database is configured and as the substitute store in tests.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::Transaction;
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

/// Keeps records in insertion order.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    records: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == tx.id) {
            return Err(RepositoryError::Duplicate(tx.id.clone()));
        }
        records.push(tx.clone());
        Ok(tx.clone())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Transaction>> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn values_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<BigDecimal>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.occurred_at >= from && r.occurred_at <= to)
            .map(|r| r.value.clone())
            .collect())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        self.records.write().await.retain(|r| r.id != id);
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
