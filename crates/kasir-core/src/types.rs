//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │    Category     │◄───────│    Product      │                         │
//! │  │  id, name       │  many  │  price (Money)  │                         │
//! │  │  description    │ to one │  stock ≥ 0      │                         │
//! │  └─────────────────┘        └────────▲────────┘                         │
//! │                                      │ product_id (not live-linked)     │
//! │  ┌─────────────────┐        ┌────────┴────────┐                         │
//! │  │  Transaction    │◄───────│TransactionDetail│                         │
//! │  │  total_amount   │  owns  │  quantity       │                         │
//! │  │  status         │        │  subtotal       │                         │
//! │  └─────────────────┘        └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All ids are store-assigned integers. A `TransactionDetail` freezes the
//! price-derived subtotal at sale time; later price edits do not touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: Money,
    /// Units on hand. Checkout never drives this below zero.
    pub stock: i64,
    pub category_id: i64,
}

/// Body for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
    #[serde(alias = "categories_id")]
    pub category_id: i64,
}

/// Optional filters for product listings. Present filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub category_id: Option<i64>,
}

// =============================================================================
// Stock
// =============================================================================

/// Price and stock of a product as read under the checkout row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockLevel {
    pub price: Money,
    pub stock: i64,
}

// =============================================================================
// Transaction
// =============================================================================

/// The status of a transaction.
///
/// Checkout only ever produces `Completed`; reports filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Completed,
}

/// A persisted checkout header. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub total_amount: Money,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// One line of a transaction. Owned by its transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price at time of sale × quantity.
    pub subtotal: Money,
}

/// A transaction header with its details in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWithDetails {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub details: Vec<TransactionDetail>,
}

/// Header fields the composer hands to the store for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTransaction {
    pub total_amount: Money,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Detail fields the composer hands to the store for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTransactionDetail {
    pub transaction_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub subtotal: Money,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// A requested (product, quantity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Reports
// =============================================================================

/// Quantity sold per product inside a report window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSales {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
}

/// A product tied for the highest quantity sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellingProduct {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "qty_terjual")]
    pub quantity_sold: i64,
}

/// Revenue, transaction count and best sellers over a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: Money,
    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,
    #[serde(rename = "produk_terlaris")]
    pub best_selling_products: Vec<BestSellingProduct>,
}

/// A [`SalesReport`] echoing the calendar dates it was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeReport {
    #[serde(flatten)]
    pub report: SalesReport,
    pub start_date: String,
    pub end_date: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
