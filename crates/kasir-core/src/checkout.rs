//! # Checkout Composition
//!
//! The checkout algorithm, written against two store traits so it can run
//! over SQLite in production and an in-memory fake in tests.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compose(unit, items, at)                                               │
//! │                                                                         │
//! │  validate_checkout_items(items)          no store access yet            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for item in items (request order):                                     │
//! │       lock_and_read(product_id) ── None ──► ProductNotFound             │
//! │       │                                                                 │
//! │       ├── stock < quantity ──────────────► InsufficientStock            │
//! │       │                                                                 │
//! │       ├── subtotal = price × quantity ─── overflow ──► AmountOverflow   │
//! │       ├── total += subtotal                                             │
//! │       └── decrement(product_id, quantity)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert_transaction(total, Completed, at)                               │
//! │  insert_detail(...) per item                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionWithDetails                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `compose` never commits or rolls back. The caller owns the unit of work
//! and must discard it when `compose` returns an error; the writes made
//! before the failing item are only undone by that rollback.
//!
//! Decrementing inside the loop means a product listed twice sees its own
//! earlier decrement, so the second entry can fail with `InsufficientStock`
//! even though the first succeeded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{
    CheckoutItem, NewTransaction, NewTransactionDetail, StockLevel, Transaction,
    TransactionDetail, TransactionStatus, TransactionWithDetails,
};
use crate::validation::validate_checkout_items;

// =============================================================================
// Store Traits
// =============================================================================

/// Product stock access inside an open unit of work.
#[async_trait]
pub trait StockLedger: Send {
    /// Store error. Domain failures are lifted into it.
    type Error: From<CoreError> + Send;

    /// Reads price and stock, holding an exclusive lock on the product row
    /// until the unit of work ends. `None` when the product does not exist.
    async fn lock_and_read(&mut self, product_id: i64) -> Result<Option<StockLevel>, Self::Error>;

    /// Subtracts `quantity` from stock. The caller has already checked
    /// that enough stock is available.
    async fn decrement(&mut self, product_id: i64, quantity: i64) -> Result<(), Self::Error>;
}

/// Transaction persistence inside the same unit of work as the ledger.
#[async_trait]
pub trait TransactionWriter: StockLedger {
    async fn insert_transaction(
        &mut self,
        header: &NewTransaction,
    ) -> Result<Transaction, Self::Error>;

    async fn insert_detail(
        &mut self,
        detail: &NewTransactionDetail,
    ) -> Result<TransactionDetail, Self::Error>;
}

// =============================================================================
// Composer
// =============================================================================

/// A checkout line after pricing.
#[derive(Debug, Clone, Copy)]
struct PricedLine {
    product_id: i64,
    quantity: i64,
    subtotal: Money,
}

/// Runs a checkout over an open unit of work.
///
/// On success the returned details are in request order. On error the
/// unit may hold partial writes and must be rolled back by the caller.
pub async fn compose<U>(
    unit: &mut U,
    items: &[CheckoutItem],
    at: DateTime<Utc>,
) -> Result<TransactionWithDetails, U::Error>
where
    U: TransactionWriter + ?Sized,
{
    validate_checkout_items(items).map_err(CoreError::from)?;

    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();

    for item in items {
        let level = unit
            .lock_and_read(item.product_id)
            .await?
            .ok_or(CoreError::ProductNotFound {
                product_id: item.product_id,
            })?;

        if level.stock < item.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: item.product_id,
                requested: item.quantity,
                available: level.stock,
            }
            .into());
        }

        let overflow = || CoreError::AmountOverflow {
            product_id: item.product_id,
        };
        let subtotal = level
            .price
            .checked_mul_quantity(item.quantity)
            .ok_or_else(overflow)?;
        total = total.checked_add(subtotal).ok_or_else(overflow)?;

        unit.decrement(item.product_id, item.quantity).await?;

        lines.push(PricedLine {
            product_id: item.product_id,
            quantity: item.quantity,
            subtotal,
        });
    }

    let transaction = unit
        .insert_transaction(&NewTransaction {
            total_amount: total,
            status: TransactionStatus::Completed,
            created_at: at,
        })
        .await?;

    let mut details = Vec::with_capacity(lines.len());
    for line in lines {
        let detail = unit
            .insert_detail(&NewTransactionDetail {
                transaction_id: transaction.id,
                product_id: line.product_id,
                quantity: line.quantity,
                subtotal: line.subtotal,
            })
            .await?;
        details.push(detail);
    }

    Ok(TransactionWithDetails {
        transaction,
        details,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::collections::BTreeMap;

    /// In-memory store. Keeps every write; there is no rollback here.
    #[derive(Default)]
    struct FakeLedger {
        products: BTreeMap<i64, StockLevel>,
        transactions: Vec<Transaction>,
        details: Vec<TransactionDetail>,
        locks: Vec<i64>,
    }

    impl FakeLedger {
        fn with_products(products: &[(i64, i64, i64)]) -> Self {
            let mut ledger = FakeLedger::default();
            for &(id, price, stock) in products {
                ledger.products.insert(
                    id,
                    StockLevel {
                        price: Money::new(price),
                        stock,
                    },
                );
            }
            ledger
        }

        fn stock(&self, id: i64) -> i64 {
            self.products[&id].stock
        }
    }

    #[async_trait]
    impl StockLedger for FakeLedger {
        type Error = CoreError;

        async fn lock_and_read(&mut self, product_id: i64) -> Result<Option<StockLevel>, CoreError> {
            self.locks.push(product_id);
            Ok(self.products.get(&product_id).copied())
        }

        async fn decrement(&mut self, product_id: i64, quantity: i64) -> Result<(), CoreError> {
            if let Some(level) = self.products.get_mut(&product_id) {
                level.stock -= quantity;
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TransactionWriter for FakeLedger {
        async fn insert_transaction(
            &mut self,
            header: &NewTransaction,
        ) -> Result<Transaction, CoreError> {
            let transaction = Transaction {
                id: self.transactions.len() as i64 + 1,
                total_amount: header.total_amount,
                status: header.status,
                created_at: header.created_at,
            };
            self.transactions.push(transaction.clone());
            Ok(transaction)
        }

        async fn insert_detail(
            &mut self,
            detail: &NewTransactionDetail,
        ) -> Result<TransactionDetail, CoreError> {
            let row = TransactionDetail {
                id: self.details.len() as i64 + 1,
                transaction_id: detail.transaction_id,
                product_id: detail.product_id,
                quantity: detail.quantity,
                subtotal: detail.subtotal,
            };
            self.details.push(row.clone());
            Ok(row)
        }
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_compose_prices_and_decrements() {
        let mut ledger = FakeLedger::with_products(&[(1, 3500, 10), (2, 15000, 5)]);

        let result = compose(
            &mut ledger,
            &[CheckoutItem::new(1, 2), CheckoutItem::new(2, 1)],
            at(),
        )
        .await
        .unwrap();

        assert_eq!(result.transaction.total_amount, Money::new(22000));
        assert_eq!(result.transaction.status, TransactionStatus::Completed);
        assert_eq!(result.transaction.created_at, at());
        assert_eq!(result.details.len(), 2);
        assert_eq!(result.details[0].product_id, 1);
        assert_eq!(result.details[0].subtotal, Money::new(7000));
        assert_eq!(result.details[1].product_id, 2);
        assert_eq!(result.details[1].subtotal, Money::new(15000));
        assert!(result
            .details
            .iter()
            .all(|d| d.transaction_id == result.transaction.id));

        assert_eq!(ledger.stock(1), 8);
        assert_eq!(ledger.stock(2), 4);
    }

    #[tokio::test]
    async fn test_compose_insufficient_stock_is_structured() {
        let mut ledger = FakeLedger::with_products(&[(1, 3500, 10), (7, 4000, 3)]);

        let err = compose(
            &mut ledger,
            &[CheckoutItem::new(1, 1), CheckoutItem::new(7, 5)],
            at(),
        )
        .await
        .unwrap_err();

        match err {
            CoreError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                assert_eq!((product_id, requested, available), (7, 5, 3));
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
        // nothing was written to the transaction side
        assert!(ledger.transactions.is_empty());
        assert!(ledger.details.is_empty());
    }

    #[tokio::test]
    async fn test_compose_missing_product() {
        let mut ledger = FakeLedger::with_products(&[(1, 3500, 10)]);

        let err = compose(&mut ledger, &[CheckoutItem::new(99, 1)], at())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound { product_id: 99 }));
        assert!(ledger.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_compose_duplicate_products_decrement_cumulatively() {
        let mut ledger = FakeLedger::with_products(&[(1, 3500, 5)]);

        let result = compose(
            &mut ledger,
            &[CheckoutItem::new(1, 2), CheckoutItem::new(1, 3)],
            at(),
        )
        .await
        .unwrap();
        assert_eq!(result.details.len(), 2);
        assert_eq!(ledger.stock(1), 0);

        let mut ledger = FakeLedger::with_products(&[(1, 3500, 5)]);
        let err = compose(
            &mut ledger,
            &[CheckoutItem::new(1, 3), CheckoutItem::new(1, 3)],
            at(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                product_id: 1,
                requested: 3,
                available: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_compose_empty_checkout() {
        let mut ledger = FakeLedger::default();

        let result = compose(&mut ledger, &[], at()).await.unwrap();

        assert!(result.transaction.total_amount.is_zero());
        assert!(result.details.is_empty());
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_compose_validates_before_store_access() {
        let mut ledger = FakeLedger::with_products(&[(1, 3500, 10)]);

        let err = compose(
            &mut ledger,
            &[CheckoutItem::new(1, 1), CheckoutItem::new(1, 0)],
            at(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert!(ledger.locks.is_empty());
        assert_eq!(ledger.stock(1), 10);
    }

    #[tokio::test]
    async fn test_compose_amount_overflow() {
        let mut ledger = FakeLedger::with_products(&[(1, i64::MAX / 2, 10)]);

        let err = compose(&mut ledger, &[CheckoutItem::new(1, 3)], at())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::AmountOverflow { product_id: 1 }));
        assert!(ledger.transactions.is_empty());
    }
}
