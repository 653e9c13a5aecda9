//! Checkout and transaction read handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use kasir_core::{CheckoutRequest, Page, Transaction, TransactionWithDetails};

use super::ListParams;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(checkout))
        .route("/transactions/{id}", get(get_transaction))
}

/// Runs one checkout as a single unit of work.
///
/// Stock shortfalls answer 400 with `product_id`, `requested` and
/// `available` beside the message.
async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TransactionWithDetails>)> {
    let Json(request) = payload?;
    let receipt = state.db.transactions().checkout(&request.items).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn list_transactions(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<Transaction>>> {
    let Query(params) = params?;
    let page = params.page_request();

    let transactions = state.db.transactions().list(&page).await?;
    Ok(Json(page.wrap(transactions)))
}

async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TransactionWithDetails>> {
    let Path(id) = id?;

    state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{send, test_app};
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::json;

    async fn create_product(app: &Router, name: &str, price: i64, stock: i64) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/products",
            Some(json!({ "name": name, "price": price, "stock": stock, "category_id": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn stock_of(app: &Router, id: i64) -> i64 {
        let (_, body) = send(app, Method::GET, &format!("/products/{}", id), None).await;
        body["stock"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_checkout_success() {
        let (app, _db) = test_app().await;
        let indomie = create_product(&app, "Indomie Goreng", 3500, 20).await;
        let kopi = create_product(&app, "Kopi Kapal Api", 1500, 50).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/transactions",
            Some(json!({ "items": [
                { "product_id": indomie, "quantity": 10 },
                { "product_id": kopi, "quantity": 2 }
            ] })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total_amount"], 38000);
        assert_eq!(body["status"], "completed");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["product_id"], indomie);
        assert_eq!(details[0]["subtotal"], 35000);
        assert_eq!(details[1]["subtotal"], 3000);

        assert_eq!(stock_of(&app, indomie).await, 10);
        assert_eq!(stock_of(&app, kopi).await, 48);

        let id = body["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/transactions/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_checkout_insufficient_stock_rolls_back() {
        let (app, _db) = test_app().await;
        let aqua = create_product(&app, "Aqua 600ml", 3500, 10).await;
        let teh = create_product(&app, "Teh Botol Sosro", 5000, 2).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/transactions",
            Some(json!({ "items": [
                { "product_id": aqua, "quantity": 5 },
                { "product_id": teh, "quantity": 3 }
            ] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["product_id"], teh);
        assert_eq!(body["requested"], 3);
        assert_eq!(body["available"], 2);
        assert!(body["error"].is_string());

        assert_eq!(stock_of(&app, aqua).await, 10);
        assert_eq!(stock_of(&app, teh).await, 2);

        let (_, list) = send(&app, Method::GET, "/transactions", None).await;
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_unknown_product() {
        let (app, _db) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/transactions",
            Some(json!({ "items": [{ "product_id": 404, "quantity": 1 }] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Product not found: 404" }));
    }

    #[tokio::test]
    async fn test_checkout_rejects_zero_quantity() {
        let (app, _db) = test_app().await;
        let aqua = create_product(&app, "Aqua 600ml", 3500, 10).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/transactions",
            Some(json!({ "items": [{ "product_id": aqua, "quantity": 0 }] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("items[0].quantity"));
        assert_eq!(stock_of(&app, aqua).await, 10);
    }

    #[tokio::test]
    async fn test_empty_checkout_records_zero_total() {
        let (app, _db) = test_app().await;

        let (status, body) = send(&app, Method::POST, "/transactions", Some(json!({}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total_amount"], 0);
        assert!(body["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_missing_transaction() {
        let (app, _db) = test_app().await;
        let aqua = create_product(&app, "Aqua 600ml", 3500, 10).await;
        for _ in 0..3 {
            send(
                &app,
                Method::POST,
                "/transactions",
                Some(json!({ "items": [{ "product_id": aqua, "quantity": 1 }] })),
            )
            .await;
        }

        let (status, body) = send(&app, Method::GET, "/transactions?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] > ids[1]);

        let (status, body) = send(&app, Method::GET, "/transactions/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Transaction not found: 999");
    }
}
