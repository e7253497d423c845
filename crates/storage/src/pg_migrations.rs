//! PostgreSQL schema bootstrap for cardbox storage.

use sqlx::PgPool;

/// Create tables and indexes if they do not exist yet.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL CHECK (length(trim(name)) > 0),
            description TEXT,
            created TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_categories_name ON categories (name)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS card_categories (
            card_id BIGINT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
            category_id BIGINT NOT NULL REFERENCES categories(id),
            PRIMARY KEY (card_id, category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_card_categories_category ON card_categories (category_id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("PostgreSQL schema up to date");
    Ok(())
}
