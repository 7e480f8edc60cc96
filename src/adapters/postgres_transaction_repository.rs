//! Postgres implementation of TransactionRepository.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::Transaction;
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed transaction repository.
///
/// `TIMESTAMPTZ` keeps microseconds, so `occurred_at` comes back with any
/// sub-microsecond digits truncated.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (id, value, occurred_at)
            VALUES ($1, $2, $3)
            RETURNING id, value, occurred_at
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.value)
        .bind(tx.occurred_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
            );
            if duplicate {
                RepositoryError::Duplicate(tx.id.clone())
            } else {
                RepositoryError::from(e)
            }
        })?;

        Ok(row.into_domain())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        let rows =
            sqlx::query_as::<_, TransactionRow>("SELECT id, value, occurred_at FROM transactions")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, value, occurred_at FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_domain()))
    }

    async fn values_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<BigDecimal>> {
        let values = sqlx::query_scalar::<_, BigDecimal>(
            "SELECT value FROM transactions WHERE occurred_at >= $1 AND occurred_at <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM transactions")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: String,
    value: BigDecimal,
    occurred_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            value: self.value,
            occurred_at: self.occurred_at,
        }
    }
}
