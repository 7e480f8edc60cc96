//! Transaction store contract.
//! Services depend on this trait only; adapters provide Postgres and in-memory backings.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Transaction;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("transaction {0} already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists a new record. Fails with `Duplicate` when the id is taken.
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction>;

    /// Every stored record, in store-defined order.
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Transaction>>;

    /// Values of the records whose `occurred_at` lies in `[from, to]`.
    async fn values_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<BigDecimal>>;

    async fn delete_all(&self) -> RepositoryResult<()>;

    /// Removes a record. Callers check existence beforehand.
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;

    async fn ping(&self) -> RepositoryResult<()>;
}
