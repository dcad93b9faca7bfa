//! # Transaction Repository
//!
//! Database operations for the transaction journal.
//!
//! Transactions are append-mostly: rows are inserted and their payment status
//! toggled, but amounts and quantities are never edited after the fact. There
//! is deliberately no foreign key to products or clients - the journal must
//! survive either being deleted.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use keeper_core::{PaymentStatus, Transaction};

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Lists all transactions, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT
                id, kind, product_id, client_id, quantity,
                unit_price_cents, total_cents, payment_status,
                description, created_at
            FROM transactions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Gets a transaction by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT
                id, kind, product_id, client_id, quantity,
                unit_price_cents, total_cents, payment_status,
                description, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Inserts a new transaction.
    ///
    /// No referential check on `product_id` or `client_id`: a transaction is
    /// always recorded, even if its product has since vanished.
    pub async fn insert(&self, transaction: &Transaction) -> DbResult<()> {
        debug!(
            id = %transaction.id,
            kind = ?transaction.kind,
            total_cents = %transaction.total_cents,
            "Inserting transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, kind, product_id, client_id, quantity,
                unit_price_cents, total_cents, payment_status,
                description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&transaction.id)
        .bind(transaction.kind)
        .bind(&transaction.product_id)
        .bind(&transaction.client_id)
        .bind(transaction.quantity)
        .bind(transaction.unit_price_cents)
        .bind(transaction.total_cents)
        .bind(transaction.payment_status)
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets a transaction's payment status.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - transaction doesn't exist
    pub async fn update_status(&self, id: &str, status: PaymentStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Updating transaction payment status");

        let result = sqlx::query("UPDATE transactions SET payment_status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    /// Counts transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
