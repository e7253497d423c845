//! CategoryStore implementation for PgStorage.

use super::*;

use crate::traits::CategoryStore;
use async_trait::async_trait;
use cardbox_core::{CategoryId, CategoryPatch, NewCategory};
use sqlx::PgConnection;

/// Exact-name get-or-create inside the caller's transaction.
///
/// A transaction-scoped advisory lock keyed on the name serializes
/// concurrent callers for the same name; it is released at commit/rollback.
/// Resolves to the oldest row when several share the name.
pub(crate) async fn get_or_create_in_tx(
    conn: &mut PgConnection,
    name: &str,
) -> Result<(Category, bool), StorageError> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let existing = sqlx::query(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1 ORDER BY id LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    if let Some(row) = existing {
        return Ok((row_to_category(&row)?, false));
    }

    let row = sqlx::query(&format!(
        "INSERT INTO categories (name, description) VALUES ($1, NULL)
         RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    let category = row_to_category(&row)?;
    tracing::debug!(id = %category.id, name, "created category during reconciliation");
    Ok((category, true))
}

#[async_trait]
impl CategoryStore for PgStorage {
    async fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        let row = sqlx::query(&format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("category", id))?;
        row_to_category(&row)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_category).collect()
    }

    async fn find_categories_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<Category>, StorageError> {
        let pattern = format!("%{}%", escape_like(needle));
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories
             WHERE name ILIKE $1 ESCAPE '\\'
             ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_category).collect()
    }

    async fn create_category(&self, input: &NewCategory) -> Result<Category, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        row_to_category(&row)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        let (set_description, description) = match &patch.description {
            Some(d) => (true, d.clone()),
            None => (false, None),
        };
        let row = sqlx::query(&format!(
            "UPDATE categories
             SET name = COALESCE($1, name),
                 description = CASE WHEN $2 THEN $3 ELSE description END
             WHERE id = $4
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&patch.name)
        .bind(set_description)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("category", id))?;
        row_to_category(&row)
    }

    async fn get_or_create_category(
        &self,
        name: &str,
    ) -> Result<(Category, bool), StorageError> {
        let mut tx = self.pool.begin().await?;
        let result = get_or_create_in_tx(&mut *tx, name).await?;
        tx.commit().await?;
        Ok(result)
    }
}
