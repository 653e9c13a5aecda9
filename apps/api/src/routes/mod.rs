//! # HTTP Routes
//!
//! ```text
//! GET    /health
//! GET    /categories            ?name&page&limit
//! POST   /categories
//! GET    /categories/{id}
//! PUT    /categories/{id}
//! DELETE /categories/{id}
//! GET    /products              ?name&category_id&page&limit
//! POST   /products
//! GET    /products/{id}
//! PUT    /products/{id}
//! DELETE /products/{id}
//! GET    /transactions          ?page&limit
//! POST   /transactions          (checkout)
//! GET    /transactions/{id}
//! GET    /api/report/hari-ini
//! GET    /api/report            ?start_date&end_date
//! ```

pub mod categories;
pub mod products;
pub mod reports;
pub mod transactions;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use kasir_core::PageRequest;
use kasir_db::migrations::migration_status;
use serde::{de, Deserialize, Deserializer};
use serde_json::{json, Value};
use std::{fmt, str::FromStr};

use crate::middleware::request_logging;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(categories::routes())
        .merge(products::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
        .layer(axum::middleware::from_fn(request_logging))
        .with_state(state)
}

/// Database ping plus embedded migration status.
///
/// Pending migrations report `degraded` with 503.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if !state.db.health_check().await {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "database": "unreachable" })),
        );
    }

    match migration_status(state.db.pool()).await {
        Ok((total, applied)) => {
            let (status, label) = if applied >= total {
                (StatusCode::OK, "ok")
            } else {
                (StatusCode::SERVICE_UNAVAILABLE, "degraded")
            };
            (
                status,
                Json(json!({
                    "status": label,
                    "database": "ok",
                    "migrations": { "total": total, "applied": applied }
                })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read migration status");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "ok" })),
            )
        }
    }
}

/// Query parameters shared by the list endpoints.
///
/// Empty values (`?page=`) count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<i64>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}
