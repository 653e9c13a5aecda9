//! # kasir-core: Pure Business Logic for Kasir
//!
//! This crate is the **heart** of Kasir, a point-of-sale backend. It holds
//! the domain types and every rule that does not need a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │   /categories  /products  /transactions  /api/report            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (SQLite)                            │   │
//! │  │   repositories, unit of work, migrations                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ implements StockLedger                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │ checkout │ │ report           │  │   │
//! │  │   │ Product  │ │  Money   │ │ compose  │ │ ReportWindow     │  │   │
//! │  │   │ Txn      │ │          │ │ traits   │ │ best_sellers     │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Transaction, reports)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`checkout`] - Store-agnostic checkout composition
//! - [`report`] - Report windows and best-seller selection
//! - [`pagination`] - Page/limit normalisation
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(3500);
//! let subtotal = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(subtotal.amount(), 10500);
//! assert_eq!(subtotal.to_string(), "Rp10.500");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod pagination;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pagination::{Page, PageRequest};
pub use report::ReportWindow;
pub use types::*;
