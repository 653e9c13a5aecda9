//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Filtered, paginated listing
//! - CRUD operations
//!
//! Stock changes made by checkout go through
//! [`SqliteUnitOfWork`](super::stock::SqliteUnitOfWork), not this repository.
//! Updates here overwrite stock directly and are not checked against
//! in-flight sales.
//!
//! ## Filtering
//! ```text
//! GET /products?name=mie&category_id=2
//!       │
//!       ▼
//! ProductFilter { name: Some("mie"), category_id: Some(2) }
//!       │
//!       ▼
//! WHERE instr(name_folded, 'mie') > 0   -- "Indomie Goreng" ✓
//!   AND category_id = 2                -- both must hold
//! ```
//!
//! `name_folded` is written from Rust on create/update, so matching is
//! case-insensitive beyond ASCII:
//! ```text
//! "ÉCLAIR Coklat"  →  name_folded = "éclair coklat"  ←  ?name=Éclair
//! ```

use kasir_core::validation::validate_product;
use kasir_core::{CoreError, Money, PageRequest, Product, ProductFilter, ProductInput};
use sqlx::SqlitePool;
use tracing::debug;

use super::search_key;
use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let filter = ProductFilter { name: Some("indomie".into()), category_id: None };
/// let page = repo.list(&filter, &PageRequest::default()).await?;
///
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id. Present filters combine with AND.
    pub async fn list(&self, filter: &ProductFilter, page: &PageRequest) -> DbResult<Vec<Product>> {
        debug!(
            name = ?filter.name,
            category_id = ?filter.category_id,
            page = page.page(),
            limit = page.limit(),
            "Listing products"
        );

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock, category_id
            FROM products
            WHERE (?1 IS NULL OR instr(name_folded, ?1) > 0)
              AND (?2 IS NULL OR category_id = ?2)
            ORDER BY id
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(filter.name.as_deref().map(search_key))
        .bind(filter.category_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock, category_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Current unit price of a product, without locking.
    pub async fn get_price(&self, id: i64) -> DbResult<Money> {
        sqlx::query_scalar::<_, Money>("SELECT price FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Creates a product.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        validate_product(input).map_err(CoreError::from)?;

        debug!(name = %input.name, price = %input.price, stock = input.stock, "Creating product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, name_folded, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, price, stock, category_id
            "#,
        )
        .bind(input.name.trim())
        .bind(search_key(&input.name))
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces every field of a product.
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        validate_product(input).map_err(CoreError::from)?;

        debug!(id, name = %input.name, "Updating product");

        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                name_folded = ?3,
                price = ?4,
                stock = ?5,
                category_id = ?6
            WHERE id = ?1
            RETURNING id, name, price, stock, category_id
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(search_key(&input.name))
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product. Past transaction details keep their `product_id`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
