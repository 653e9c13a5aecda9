//! # kasir-api: HTTP Layer for Kasir
//!
//! Routing, request parsing, error-to-status mapping and JSON encoding over
//! [`kasir_db`]. Business rules live in `kasir-core`; nothing here decides
//! whether a checkout succeeds.
//!
//! ## Configuration
//! Environment variables (an optional `.env` file is read first):
//! - `PORT` - HTTP listen port (default 8080)
//! - `DB_PATH` - SQLite database file (default `./kasir.db`)
//! - `DB_MAX_CONNECTIONS` - pool size (default 5)
//! - `REPORT_UTC_OFFSET` - report day boundaries, e.g. `+07:00` (default `+00:00`)
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
