//! # Report Repository
//!
//! Read-only sales aggregates over a [`ReportWindow`].
//!
//! ```text
//! transactions (status = 'completed', created_at in window)
//!     ├── SUM(total_amount), COUNT(*)          → total_revenue, total_transaksi
//!     └── ⋈ transaction_details ⋈ products
//!             GROUP BY product                  → per-product quantity
//!                                                     │
//!                                     kasir_core::report::best_sellers
//!                                                     │
//!                                                     ▼
//!                                               produk_terlaris (all ties)
//! ```
//!
//! Sales of products that were deleted since no longer show up as best
//! sellers; they still count toward revenue.

use chrono::{DateTime, FixedOffset, Utc};
use kasir_core::report::{best_sellers, parse_report_date};
use kasir_core::{
    DateRangeReport, Money, ProductSales, ReportWindow, SalesReport, TransactionStatus,
};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Report for the calendar day containing `now` in `offset`.
    pub async fn today(&self, now: DateTime<Utc>, offset: FixedOffset) -> DbResult<SalesReport> {
        self.sales_report(&ReportWindow::today(now, offset)).await
    }

    /// Report over `[start_date 00:00, end_date 23:59:59.999999999]`.
    ///
    /// Both dates must be `YYYY-MM-DD`; they are echoed back unchanged.
    pub async fn date_range(
        &self,
        start_date: &str,
        end_date: &str,
        offset: FixedOffset,
    ) -> DbResult<DateRangeReport> {
        let start = parse_report_date(start_date)?;
        let end = parse_report_date(end_date)?;

        let report = self
            .sales_report(&ReportWindow::for_dates(start, end, offset))
            .await?;

        Ok(DateRangeReport {
            report,
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        })
    }

    /// Revenue, transaction count and best sellers inside `window`.
    pub async fn sales_report(&self, window: &ReportWindow) -> DbResult<SalesReport> {
        debug!(start = %window.start, end = %window.end, "Building sales report");

        let (total_revenue, total_transactions): (Money, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE status = ?1 AND created_at >= ?2 AND created_at <= ?3
            "#,
        )
        .bind(TransactionStatus::Completed)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        let sales = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT p.id AS product_id, p.name AS name, SUM(td.quantity) AS quantity_sold
            FROM transaction_details td
            JOIN transactions t ON td.transaction_id = t.id
            JOIN products p ON td.product_id = p.id
            WHERE t.status = ?1 AND t.created_at >= ?2 AND t.created_at <= ?3
            GROUP BY p.id, p.name
            "#,
        )
        .bind(TransactionStatus::Completed)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(SalesReport {
            total_revenue,
            total_transactions,
            best_selling_products: best_sellers(sales),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use chrono::{DateTime, FixedOffset, Utc};
    use kasir_core::{CheckoutItem, CoreError, Money, ProductInput};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    async fn create_product(db: &Database, name: &str, price: i64) -> i64 {
        db.products()
            .create(&ProductInput {
                name: name.to_string(),
                price: Money::new(price),
                stock: 1000,
                category_id: 1,
            })
            .await
            .unwrap()
            .id
    }

    async fn sell(db: &Database, at: &str, items: &[(i64, i64)]) {
        let items: Vec<_> = items
            .iter()
            .map(|&(id, qty)| CheckoutItem::new(id, qty))
            .collect();
        db.transactions().checkout_at(&items, utc(at)).await.unwrap();
    }

    #[tokio::test]
    async fn test_single_day_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let indomie = create_product(&db, "Indomie Goreng", 3500).await;
        let kopi = create_product(&db, "Kopi Kapal Api", 1500).await;

        sell(&db, "2026-01-01T08:00:00Z", &[(indomie, 10)]).await; // 35000
        sell(&db, "2026-01-01T17:30:00Z", &[(kopi, 10)]).await; // 15000
        sell(&db, "2026-01-02T09:00:00Z", &[(indomie, 1)]).await;

        let report = db
            .reports()
            .date_range("2026-01-01", "2026-01-01", utc_offset())
            .await
            .unwrap();

        assert_eq!(report.report.total_revenue, Money::new(50000));
        assert_eq!(report.report.total_transactions, 2);
        assert_eq!(report.start_date, "2026-01-01");
        assert_eq!(report.end_date, "2026-01-01");
        // tied at 10 each
        let names: Vec<_> = report
            .report
            .best_selling_products
            .iter()
            .map(|p| (p.name.as_str(), p.quantity_sold))
            .collect();
        assert_eq!(names, vec![("Indomie Goreng", 10), ("Kopi Kapal Api", 10)]);
    }

    #[tokio::test]
    async fn test_window_bounds_are_inclusive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let aqua = create_product(&db, "Aqua 600ml", 3000).await;

        sell(&db, "2026-01-01T00:00:00Z", &[(aqua, 1)]).await;
        sell(&db, "2026-01-31T23:59:59.999999999Z", &[(aqua, 2)]).await;
        sell(&db, "2026-02-01T00:00:00Z", &[(aqua, 4)]).await;
        sell(&db, "2025-12-31T23:59:59.5Z", &[(aqua, 8)]).await;

        let report = db
            .reports()
            .date_range("2026-01-01", "2026-01-31", utc_offset())
            .await
            .unwrap()
            .report;

        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.total_revenue, Money::new(9000));
        assert_eq!(report.best_selling_products.len(), 1);
        assert_eq!(report.best_selling_products[0].quantity_sold, 3);
    }

    #[tokio::test]
    async fn test_best_seller_sums_across_transactions() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let indomie = create_product(&db, "Indomie Goreng", 3500).await;
        let teh = create_product(&db, "Teh Botol Sosro", 4000).await;

        sell(&db, "2026-03-05T10:00:00Z", &[(indomie, 4), (teh, 6)]).await;
        sell(&db, "2026-03-05T11:00:00Z", &[(indomie, 3)]).await;

        let report = db
            .reports()
            .date_range("2026-03-05", "2026-03-05", utc_offset())
            .await
            .unwrap()
            .report;

        assert_eq!(report.best_selling_products.len(), 1);
        assert_eq!(report.best_selling_products[0].name, "Indomie Goreng");
        assert_eq!(report.best_selling_products[0].quantity_sold, 7);
    }

    #[tokio::test]
    async fn test_only_completed_transactions_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let aqua = create_product(&db, "Aqua 600ml", 3000).await;
        sell(&db, "2026-04-01T10:00:00Z", &[(aqua, 1)]).await;

        sqlx::query(
            "INSERT INTO transactions (total_amount, status, created_at) VALUES (99000, 'pending', ?1)",
        )
        .bind(utc("2026-04-01T11:00:00Z"))
        .execute(db.pool())
        .await
        .unwrap();

        let report = db
            .reports()
            .date_range("2026-04-01", "2026-04-01", utc_offset())
            .await
            .unwrap()
            .report;

        assert_eq!(report.total_transactions, 1);
        assert_eq!(report.total_revenue, Money::new(3000));
    }

    #[tokio::test]
    async fn test_empty_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let report = db
            .reports()
            .today(utc("2026-05-01T12:00:00Z"), utc_offset())
            .await
            .unwrap();

        assert_eq!(report.total_revenue, Money::zero());
        assert_eq!(report.total_transactions, 0);
        assert!(report.best_selling_products.is_empty());
    }

    #[tokio::test]
    async fn test_today_respects_offset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let aqua = create_product(&db, "Aqua 600ml", 3000).await;
        // 2026-05-01 18:00 UTC is 2026-05-02 01:00 in +07:00
        sell(&db, "2026-05-01T18:00:00Z", &[(aqua, 1)]).await;

        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let report = db
            .reports()
            .today(utc("2026-05-02T03:00:00Z"), wib)
            .await
            .unwrap();
        assert_eq!(report.total_transactions, 1);

        let report = db
            .reports()
            .today(utc("2026-05-02T03:00:00Z"), utc_offset())
            .await
            .unwrap();
        assert_eq!(report.total_transactions, 0);
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .reports()
            .date_range("not-a-date", "2026-01-01", utc_offset())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidDateFormat { .. })
        ));
    }
}
