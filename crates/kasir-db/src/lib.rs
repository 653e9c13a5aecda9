//! # kasir-db: Database Layer for Kasir
//!
//! This crate provides database access for Kasir.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /transactions)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasir-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                 │   │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo    │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo     │   │ 001_initial  │  │   │
//! │  │   │               │    │ TransactionRepo │   │              │  │   │
//! │  │   │               │    │ ReportRepo      │   │              │  │   │
//! │  │   └───────────────┘    └────────┬────────┘   └──────────────┘  │   │
//! │  │                                 │                               │   │
//! │  │                     SqliteUnitOfWork (stock.rs)                 │   │
//! │  │                     implements kasir_core::checkout traits      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (kasir.db)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations and the checkout unit of work
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//! use kasir_core::CheckoutItem;
//!
//! let db = Database::new(DbConfig::new("./kasir.db")).await?;
//!
//! let receipt = db
//!     .transactions()
//!     .checkout(&[CheckoutItem::new(1, 2)])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::stock::SqliteUnitOfWork;
pub use repository::transaction::TransactionRepository;
