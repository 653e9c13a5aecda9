//! # SQLite Unit of Work
//!
//! One SQLite transaction exposed through the `kasir_core::checkout` traits.
//!
//! ## Row Locking on SQLite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SQLite has no SELECT ... FOR UPDATE. The first statement of every      │
//! │  checkout is a write that touches the product row:                      │
//! │                                                                         │
//! │    UPDATE products SET stock = stock WHERE id = ?1                      │
//! │    RETURNING price, stock                                               │
//! │                                                                         │
//! │  That takes the database write lock and reads in one step, so:         │
//! │                                                                         │
//! │   checkout A ── BEGIN ── touch(7) ✓ lock ── ... ── COMMIT               │
//! │   checkout B ── BEGIN ── touch(7) ⏳ busy wait ───────────► ✓ sees A's  │
//! │                                                          decrement     │
//! │                                                                         │
//! │  Readers keep running under WAL; only writers queue.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping a unit without calling [`SqliteUnitOfWork::commit`] rolls it back.

use async_trait::async_trait;
use kasir_core::checkout::{StockLedger, TransactionWriter};
use kasir_core::{NewTransaction, NewTransactionDetail, StockLevel, Transaction, TransactionDetail};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// An open SQLite transaction used for one checkout.
pub struct SqliteUnitOfWork {
    tx: sqlx::Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    /// Opens a unit of work on a pooled connection.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(SqliteUnitOfWork { tx })
    }

    /// Makes every write in the unit durable.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    /// Discards every write in the unit.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

#[async_trait]
impl StockLedger for SqliteUnitOfWork {
    type Error = DbError;

    async fn lock_and_read(&mut self, product_id: i64) -> DbResult<Option<StockLevel>> {
        debug!(product_id, "Locking product row");

        let level = sqlx::query_as::<_, StockLevel>(
            r#"
            UPDATE products SET stock = stock
            WHERE id = ?1
            RETURNING price, stock
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(level)
    }

    async fn decrement(&mut self, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(product_id, quantity, "Decrementing stock");

        let result = sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        Ok(())
    }
}

#[async_trait]
impl TransactionWriter for SqliteUnitOfWork {
    async fn insert_transaction(&mut self, header: &NewTransaction) -> DbResult<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (total_amount, status, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, total_amount, status, created_at
            "#,
        )
        .bind(header.total_amount)
        .bind(header.status)
        .bind(header.created_at)
        .fetch_one(&mut *self.tx)
        .await?;

        debug!(id = transaction.id, total = %transaction.total_amount, "Inserted transaction");
        Ok(transaction)
    }

    async fn insert_detail(&mut self, detail: &NewTransactionDetail) -> DbResult<TransactionDetail> {
        let row = sqlx::query_as::<_, TransactionDetail>(
            r#"
            INSERT INTO transaction_details (transaction_id, product_id, quantity, subtotal)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, transaction_id, product_id, quantity, subtotal
            "#,
        )
        .bind(detail.transaction_id)
        .bind(detail.product_id)
        .bind(detail.quantity)
        .bind(detail.subtotal)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
