use std::collections::HashMap;

use cardbox_core::{Card, CardId, CardPatch, CategoryId, NewCard};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use super::categories::get_or_create_on;
use super::{Storage, get_conn, parse_timestamp};
use crate::error::StorageError;

const CARD_COLUMNS: &str = "id, title, description, created, updated";

/// Card row before category names are attached.
struct CardRow {
    id: i64,
    title: String,
    description: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self, category_names: Vec<String>) -> Card {
        Card {
            id: CardId(self.id),
            title: self.title,
            description: self.description,
            category_names,
            created: self.created,
            updated: self.updated,
        }
    }
}

fn row_to_card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created: parse_timestamp(3, &row.get::<_, String>(3)?)?,
        updated: parse_timestamp(4, &row.get::<_, String>(4)?)?,
    })
}

fn category_names_for(conn: &Connection, card_id: i64) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT c.name FROM categories c
         JOIN card_categories cc ON cc.category_id = c.id
         WHERE cc.card_id = ?1
         ORDER BY c.id",
    )?;
    let rows = stmt.query_map(params![card_id], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn load_card(conn: &Connection, id: CardId) -> Result<Card, StorageError> {
    let row = conn
        .query_row(
            &format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1"),
            params![id.0],
            row_to_card_row,
        )
        .optional()?
        .ok_or_else(|| StorageError::not_found("card", id))?;
    let names = category_names_for(conn, row.id)?;
    Ok(row.into_card(names))
}

/// Resolve every name to a category and make it the card's whole
/// association set.
fn replace_categories(
    conn: &Connection,
    card_id: i64,
    names: &[String],
    now: DateTime<Utc>,
) -> Result<(), StorageError> {
    conn.execute("DELETE FROM card_categories WHERE card_id = ?1", params![card_id])?;
    for name in names {
        let (category, _) = get_or_create_on(conn, name, now)?;
        conn.execute(
            "INSERT OR IGNORE INTO card_categories (card_id, category_id) VALUES (?1, ?2)",
            params![card_id, category.id.0],
        )?;
    }
    Ok(())
}

impl Storage {
    /// Get card by ID with category names.
    ///
    /// # Errors
    /// `NotFound` if no row has this id, otherwise database failures.
    pub fn get_card(&self, id: CardId) -> Result<Card, StorageError> {
        let conn = get_conn(&self.pool)?;
        load_card(&conn, id)
    }

    /// List cards in id order, optionally restricted to one category.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_cards(&self, category: Option<CategoryId>) -> Result<Vec<Card>, StorageError> {
        let conn = get_conn(&self.pool)?;

        let rows: Vec<CardRow> = match category {
            Some(category_id) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {CARD_COLUMNS} FROM cards
                     WHERE id IN (SELECT card_id FROM card_categories WHERE category_id = ?1)
                     ORDER BY id"
                ))?;
                let mapped = stmt.query_map(params![category_id.0], row_to_card_row)?;
                mapped.collect::<Result<Vec<_>, _>>()?
            },
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY id"))?;
                let mapped = stmt.query_map([], row_to_card_row)?;
                mapped.collect::<Result<Vec<_>, _>>()?
            },
        };

        let mut names_by_card: HashMap<i64, Vec<String>> = HashMap::new();
        let mut stmt = conn.prepare(
            "SELECT cc.card_id, c.name FROM card_categories cc
             JOIN categories c ON c.id = cc.category_id
             ORDER BY cc.card_id, c.id",
        )?;
        let pairs = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for pair in pairs {
            let (card_id, name) = pair?;
            names_by_card.entry(card_id).or_default().push(name);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let names = names_by_card.remove(&row.id).unwrap_or_default();
                row.into_card(names)
            })
            .collect())
    }

    /// Create a card and attach its categories in one immediate transaction.
    ///
    /// # Errors
    /// Any failure rolls back the card, new categories and associations.
    pub fn create_card(&self, input: &NewCard) -> Result<Card, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let now = Utc::now();
        let stamp = now.to_rfc3339();

        tx.execute(
            "INSERT INTO cards (title, description, created, updated) VALUES (?1, ?2, ?3, ?4)",
            params![input.title, input.description, stamp, stamp],
        )?;
        let card_id = tx.last_insert_rowid();
        replace_categories(&tx, card_id, &input.category_names, now)?;

        let card = load_card(&tx, CardId(card_id))?;
        tx.commit()?;
        tracing::debug!(id = card_id, categories = card.category_names.len(), "card created");
        Ok(card)
    }

    /// Update supplied fields, always refreshing `updated`.
    ///
    /// # Errors
    /// `NotFound` if no row has this id; any failure rolls back the write.
    pub fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let now = Utc::now();

        let changed = tx.execute(
            "UPDATE cards
             SET title = COALESCE(?1, title),
                 description = COALESCE(?2, description),
                 updated = ?3
             WHERE id = ?4",
            params![patch.title, patch.description, now.to_rfc3339(), id.0],
        )?;
        if changed == 0 {
            return Err(StorageError::not_found("card", id));
        }
        if let Some(names) = &patch.category_names {
            replace_categories(&tx, id.0, names, now)?;
        }

        let card = load_card(&tx, id)?;
        tx.commit()?;
        Ok(card)
    }
}
