//! CardStore implementation for PgStorage.

use std::collections::HashMap;

use super::*;
use super::categories::get_or_create_in_tx;

use crate::traits::CardStore;
use async_trait::async_trait;
use cardbox_core::{Card, CardId, CardPatch, CategoryId, NewCard};
use sqlx::PgConnection;

const CARD_COLUMNS: &str = "id, title, description, created, updated";

fn row_to_card(
    row: &sqlx::postgres::PgRow,
    category_names: Vec<String>,
) -> Result<Card, StorageError> {
    Ok(Card {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        category_names,
        created: row.try_get("created")?,
        updated: row.try_get("updated")?,
    })
}

async fn category_names_for(
    conn: &mut PgConnection,
    card_id: CardId,
) -> Result<Vec<String>, StorageError> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT c.name FROM categories c
         JOIN card_categories cc ON cc.category_id = c.id
         WHERE cc.card_id = $1
         ORDER BY c.id",
    )
    .bind(card_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(names)
}

async fn load_card(conn: &mut PgConnection, id: CardId) -> Result<Card, StorageError> {
    let row = sqlx::query(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StorageError::not_found("card", id))?;
    let names = category_names_for(conn, id).await?;
    row_to_card(&row, names)
}

/// Resolve every name to a category and make it the card's whole
/// association set.
async fn replace_categories(
    conn: &mut PgConnection,
    card_id: CardId,
    names: &[String],
) -> Result<(), StorageError> {
    sqlx::query("DELETE FROM card_categories WHERE card_id = $1")
        .bind(card_id)
        .execute(&mut *conn)
        .await?;
    for name in names {
        let (category, _) = get_or_create_in_tx(conn, name).await?;
        sqlx::query(
            "INSERT INTO card_categories (card_id, category_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(card_id)
        .bind(category.id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl CardStore for PgStorage {
    async fn get_card(&self, id: CardId) -> Result<Card, StorageError> {
        let mut conn = self.pool.acquire().await?;
        load_card(&mut *conn, id).await
    }

    async fn list_cards(&self, category: Option<CategoryId>) -> Result<Vec<Card>, StorageError> {
        let rows = match category {
            Some(category_id) => {
                sqlx::query(&format!(
                    "SELECT {CARD_COLUMNS} FROM cards
                     WHERE id IN (SELECT card_id FROM card_categories WHERE category_id = $1)
                     ORDER BY id"
                ))
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            },
            None => {
                sqlx::query(&format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            },
        };

        let pairs: Vec<(i64, String)> = sqlx::query_as(
            "SELECT cc.card_id, c.name FROM card_categories cc
             JOIN categories c ON c.id = cc.category_id
             ORDER BY cc.card_id, c.id",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut names_by_card: HashMap<i64, Vec<String>> = HashMap::new();
        for (card_id, name) in pairs {
            names_by_card.entry(card_id).or_default().push(name);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                row_to_card(row, names_by_card.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn create_card(&self, input: &NewCard) -> Result<Card, StorageError> {
        let mut tx = self.pool.begin().await?;

        let card_id: CardId = sqlx::query_scalar(
            "INSERT INTO cards (title, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;
        replace_categories(&mut *tx, card_id, &input.category_names).await?;

        let card = load_card(&mut *tx, card_id).await?;
        tx.commit().await?;
        tracing::debug!(id = %card_id, categories = card.category_names.len(), "card created");
        Ok(card)
    }

    async fn update_card(&self, id: CardId, patch: &CardPatch) -> Result<Card, StorageError> {
        let mut tx = self.pool.begin().await?;

        let changed = sqlx::query(
            "UPDATE cards
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 updated = NOW()
             WHERE id = $3",
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if changed == 0 {
            return Err(StorageError::not_found("card", id));
        }
        if let Some(names) = &patch.category_names {
            replace_categories(&mut *tx, id, names).await?;
        }

        let card = load_card(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(card)
    }
}
