//! # Transaction Repository
//!
//! Checkout and transaction history.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Lifecycle                                │
//! │                                                                         │
//! │  1. BEGIN                                                              │
//! │     └── SqliteUnitOfWork::begin (failure → TransactionFailed)          │
//! │                                                                         │
//! │  2. COMPOSE (kasir_core::checkout::compose)                            │
//! │     └── lock + check + decrement per item, then header + details       │
//! │                                                                         │
//! │  3a. Ok  → COMMIT   → TransactionWithDetails                           │
//! │  3b. Err → ROLLBACK → same error back to the caller                    │
//! │            (stock and tables exactly as before the call)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use kasir_core::checkout::compose;
use kasir_core::{CheckoutItem, PageRequest, Transaction, TransactionDetail, TransactionWithDetails};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use crate::error::DbResult;
use crate::repository::stock::SqliteUnitOfWork;

/// Repository for checkout and transaction history.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Checks out `items` as one atomic sale stamped with the current time.
    ///
    /// ## Errors
    /// * `DbError::Domain(ProductNotFound | InsufficientStock | Validation | AmountOverflow)`
    /// * `DbError::TransactionFailed` and other persistence failures
    ///
    /// Any error leaves the database unchanged.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<TransactionWithDetails> {
        self.checkout_at(items, Utc::now()).await
    }

    /// [`checkout`](Self::checkout) with an explicit timestamp.
    pub async fn checkout_at(
        &self,
        items: &[CheckoutItem],
        at: DateTime<Utc>,
    ) -> DbResult<TransactionWithDetails> {
        debug!(items = items.len(), "Starting checkout");

        let mut unit = SqliteUnitOfWork::begin(&self.pool).await?;

        match compose(&mut unit, items, at).await {
            Ok(receipt) => {
                unit.commit().await?;
                info!(
                    transaction_id = receipt.transaction.id,
                    total = %receipt.transaction.total_amount,
                    lines = receipt.details.len(),
                    "Checkout committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = unit.rollback().await {
                    error!(error = %rollback_err, "Checkout rollback failed");
                }
                warn!(error = %err, "Checkout rolled back");
                Err(err)
            }
        }
    }

    /// Lists transaction headers, newest first.
    pub async fn list(&self, page: &PageRequest) -> DbResult<Vec<Transaction>> {
        debug!(page = page.page(), limit = page.limit(), "Listing transactions");

        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, total_amount, status, created_at
            FROM transactions
            ORDER BY id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Gets a transaction with its details in request order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<TransactionWithDetails>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, total_amount, status, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(transaction) = transaction else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(TransactionWithDetails {
            transaction,
            details,
        }))
    }

    /// Counts all transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
