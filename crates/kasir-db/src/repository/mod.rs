//! # Repository Module
//!
//! Database repository implementations for Kasir.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and the Unit of Work                    │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&items)                            │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── checkout(items)      ── begin ──► SqliteUnitOfWork                │
//! │  ├── get_by_id(id)                     ├── lock_and_read               │
//! │  └── list(page)                        ├── decrement                   │
//! │                                        ├── insert_transaction          │
//! │                                        └── insert_detail               │
//! │                                             │                          │
//! │                           kasir_core::checkout::compose drives it      │
//! │                                             │                          │
//! │                              commit on Ok, rollback on Err             │
//! │                                                                         │
//! │  CategoryRepository, ProductRepository  ─ plain CRUD on the pool      │
//! │  ReportRepository                       ─ read-only aggregates         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and filtering
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout and history
//! - [`ReportRepository`](report::ReportRepository) - Sales aggregates
//! - [`SqliteUnitOfWork`](stock::SqliteUnitOfWork) - Stock ledger inside one SQLite transaction

pub mod category;
pub mod product;
pub mod report;
pub mod stock;
pub mod transaction;

/// Search key for name filters: trimmed and Unicode-lowercased.
///
/// Stored in `name_folded` on write and applied to the filter term on read,
/// so `"éclair"` finds `"ÉCLAIR Coklat"`.
pub(crate) fn search_key(name: &str) -> String {
    name.trim().to_lowercase()
}
