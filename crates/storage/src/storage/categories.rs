use cardbox_core::{Category, CategoryId, CategoryPatch, NewCategory};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use super::{Storage, get_conn, parse_timestamp};
use crate::error::StorageError;

const CATEGORY_COLUMNS: &str = "id, name, description, created";

pub(crate) fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: CategoryId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        created: parse_timestamp(3, &row.get::<_, String>(3)?)?,
    })
}

fn load_category(conn: &Connection, id: CategoryId) -> Result<Category, StorageError> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"),
        params![id.0],
        row_to_category,
    )
    .optional()?
    .ok_or_else(|| StorageError::not_found("category", id))
}

/// Exact-name get-or-create on an open connection or transaction.
///
/// Resolves to the oldest row when several share the name. Callers hold an
/// immediate transaction, so no other writer can slip an insert between the
/// lookup and our own insert.
pub(crate) fn get_or_create_on(
    conn: &Connection,
    name: &str,
    now: DateTime<Utc>,
) -> Result<(Category, bool), StorageError> {
    let existing = conn
        .query_row(
            &format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?1 ORDER BY id LIMIT 1"
            ),
            params![name],
            row_to_category,
        )
        .optional()?;
    if let Some(category) = existing {
        return Ok((category, false));
    }

    conn.execute(
        "INSERT INTO categories (name, description, created) VALUES (?1, NULL, ?2)",
        params![name, now.to_rfc3339()],
    )?;
    let id = CategoryId(conn.last_insert_rowid());
    tracing::debug!(%id, name, "created category during reconciliation");
    Ok((Category { id, name: name.to_owned(), description: None, created: now }, true))
}

impl Storage {
    /// Get category by ID.
    ///
    /// # Errors
    /// `NotFound` if no row has this id, otherwise database failures.
    pub fn get_category(&self, id: CategoryId) -> Result<Category, StorageError> {
        let conn = get_conn(&self.pool)?;
        load_category(&conn, id)
    }

    /// List all categories in id order.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Case-insensitive substring match on name, in id order.
    ///
    /// Case is folded with Unicode lowercasing in Rust; SQLite's `LIKE` and
    /// `lower()` only know ASCII.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn find_categories_by_name_contains(
        &self,
        needle: &str,
    ) -> Result<Vec<Category>, StorageError> {
        let needle = needle.to_lowercase();
        let mut categories = self.list_categories()?;
        categories.retain(|c| c.name.to_lowercase().contains(&needle));
        Ok(categories)
    }

    /// Insert a category with the name exactly as given.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn create_category(&self, input: &NewCategory) -> Result<Category, StorageError> {
        let conn = get_conn(&self.pool)?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO categories (name, description, created) VALUES (?1, ?2, ?3)",
            params![input.name, input.description, now.to_rfc3339()],
        )?;
        let id = CategoryId(conn.last_insert_rowid());
        Ok(Category {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            created: now,
        })
    }

    /// Apply the supplied fields of `patch`.
    ///
    /// # Errors
    /// `NotFound` if no row has this id, otherwise database failures.
    pub fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category, StorageError> {
        let conn = get_conn(&self.pool)?;
        let (set_description, description) = match &patch.description {
            Some(d) => (true, d.clone()),
            None => (false, None),
        };
        let changed = conn.execute(
            "UPDATE categories
             SET name = COALESCE(?1, name),
                 description = CASE WHEN ?2 THEN ?3 ELSE description END
             WHERE id = ?4",
            params![patch.name, set_description, description, id.0],
        )?;
        if changed == 0 {
            return Err(StorageError::not_found("category", id));
        }
        load_category(&conn, id)
    }

    /// Exact-name get-or-create in its own immediate transaction.
    ///
    /// # Errors
    /// `Conflict` if the write lock could not be taken in time.
    pub fn get_or_create_category(&self, name: &str) -> Result<(Category, bool), StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let result = get_or_create_on(&tx, name, Utc::now())?;
        tx.commit()?;
        Ok(result)
    }
}
