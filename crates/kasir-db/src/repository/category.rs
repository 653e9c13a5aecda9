//! # Category Repository
//!
//! Database operations for categories.

use chrono::Utc;
use kasir_core::validation::validate_category;
use kasir_core::{Category, CategoryInput, CoreError, PageRequest};
use sqlx::SqlitePool;
use tracing::debug;

use super::search_key;
use crate::error::{DbError, DbResult};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists categories ordered by id.
    ///
    /// `name` filters by case-insensitive substring; `None` lists everything.
    pub async fn list(&self, name: Option<&str>, page: &PageRequest) -> DbResult<Vec<Category>> {
        debug!(name = ?name, page = page.page(), limit = page.limit(), "Listing categories");

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE (?1 IS NULL OR instr(name_folded, ?1) > 0)
            ORDER BY id
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(name.map(search_key))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Creates a category. The name is stored trimmed.
    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        validate_category(input).map_err(CoreError::from)?;

        let now = Utc::now();
        debug!(name = %input.name, "Creating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, name_folded, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(input.name.trim())
        .bind(search_key(&input.name))
        .bind(&input.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Replaces a category's name and description and bumps `updated_at`.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        validate_category(input).map_err(CoreError::from)?;

        debug!(id, name = %input.name, "Updating category");

        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name = ?2,
                name_folded = ?3,
                description = ?4,
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(search_key(&input.name))
        .bind(&input.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category. Products keep their `category_id`.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasir_core::{CategoryInput, CoreError, PageRequest};

    fn input(name: &str, description: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let created = repo.create(&input("  Makanan ", "Kategori makanan")).await.unwrap();
        assert_eq!(created.name, "Makanan");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = repo
            .update(created.id, &input("Makanan Ringan", "Snack"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Makanan Ringan");
        assert_eq!(updated.description, "Snack");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        assert!(matches!(
            repo.update(404, &input("Minuman", "")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(404).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.categories().create(&input("   ", "")).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();
        for name in ["Minuman", "Makanan", "Minuman Dingin", "Sabun"] {
            repo.create(&input(name, "")).await.unwrap();
        }

        let all = repo.list(None, &PageRequest::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let drinks = repo.list(Some("MINUM"), &PageRequest::default()).await.unwrap();
        let names: Vec<_> = drinks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Minuman", "Minuman Dingin"]);

        let second_page = repo
            .list(None, &PageRequest::new(Some(2), Some(3)))
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].name, "Sabun");

        let past_end = repo
            .list(None, &PageRequest::new(Some(9), Some(10)))
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_name_filter_folds_non_ascii_case() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();
        repo.create(&input("ÉPICERIE Impor", "")).await.unwrap();
        repo.create(&input("Minuman", "")).await.unwrap();

        let found = repo.list(Some("épicerie"), &PageRequest::default()).await.unwrap();
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ÉPICERIE Impor"]);
    }
}
