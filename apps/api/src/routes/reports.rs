//! Sales report handlers.
//!
//! Both reports use the calendar days of the configured report offset.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use kasir_core::{DateRangeReport, SalesReport};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/report/hari-ini", get(today_report))
        .route("/api/report", get(date_range_report))
}

#[derive(Debug, Default, Deserialize)]
struct DateRangeParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Report for today.
async fn today_report(State(state): State<AppState>) -> ApiResult<Json<SalesReport>> {
    let report = state
        .db
        .reports()
        .today(Utc::now(), state.report_offset)
        .await?;
    Ok(Json(report))
}

/// Report for `start_date..=end_date` (both `YYYY-MM-DD`).
async fn date_range_report(
    State(state): State<AppState>,
    params: Result<Query<DateRangeParams>, QueryRejection>,
) -> ApiResult<Json<DateRangeReport>> {
    let Query(params) = params?;

    let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
    let (Some(start_date), Some(end_date)) =
        (non_empty(params.start_date), non_empty(params.end_date))
    else {
        return Err(ApiError::bad_request("start_date and end_date are required"));
    };

    let report = state
        .db
        .reports()
        .date_range(&start_date, &end_date, state.report_offset)
        .await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, test_app};
    use axum::http::{Method, StatusCode};
    use chrono::{DateTime, Utc};
    use kasir_core::{CheckoutItem, Money, ProductInput};
    use kasir_db::Database;
    use serde_json::json;

    async fn sell_at(db: &Database, at: &str, name: &str, price: i64, quantity: i64) {
        let product = db
            .products()
            .create(&ProductInput {
                name: name.to_string(),
                price: Money::new(price),
                stock: 100,
                category_id: 1,
            })
            .await
            .unwrap();
        let at = DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc);
        db.transactions()
            .checkout_at(&[CheckoutItem::new(product.id, quantity)], at)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_date_range_report() {
        let (app, db) = test_app().await;
        sell_at(&db, "2026-01-01T09:00:00Z", "Indomie Goreng", 3500, 10).await;
        sell_at(&db, "2026-01-01T15:00:00Z", "Kopi Kapal Api", 1500, 10).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/report?start_date=2026-01-01&end_date=2026-01-01",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_revenue": 50000,
                "total_transaksi": 2,
                "produk_terlaris": [
                    { "nama": "Indomie Goreng", "qty_terjual": 10 },
                    { "nama": "Kopi Kapal Api", "qty_terjual": 10 }
                ],
                "start_date": "2026-01-01",
                "end_date": "2026-01-01"
            })
        );
    }

    #[tokio::test]
    async fn test_today_report_counts_current_sales() {
        let (app, _db) = test_app().await;
        let (_, product) = send(
            &app,
            Method::POST,
            "/products",
            Some(json!({ "name": "Aqua 600ml", "price": 3500, "stock": 10, "category_id": 1 })),
        )
        .await;
        send(
            &app,
            Method::POST,
            "/transactions",
            Some(json!({ "items": [{ "product_id": product["id"], "quantity": 2 }] })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/report/hari-ini", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], 7000);
        assert_eq!(body["total_transaksi"], 1);
        assert_eq!(body["produk_terlaris"][0]["nama"], "Aqua 600ml");
        assert!(body.get("start_date").is_none());
    }

    #[tokio::test]
    async fn test_missing_dates() {
        let (app, _db) = test_app().await;

        for uri in [
            "/api/report",
            "/api/report?start_date=2026-01-01",
            "/api/report?start_date=&end_date=2026-01-01",
        ] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body, json!({ "error": "start_date and end_date are required" }));
        }
    }

    #[tokio::test]
    async fn test_malformed_dates() {
        let (app, _db) = test_app().await;

        for uri in [
            "/api/report?start_date=01-01-2026&end_date=2026-01-31",
            "/api/report?start_date=2026-01-01&end_date=2026-02-30",
            "/api/report?start_date=2026-1-1&end_date=2026-01-31",
        ] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body, json!({ "error": "Invalid date format, use YYYY-MM-DD" }));
        }
    }
}
