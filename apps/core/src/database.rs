//! Knowledge store access.
//!
//! Thin SQLite collaborator for the matching engine: schema creation,
//! idempotent seeding of the curated Q&A rows, and the three operations the
//! engine needs (load all, append, query by category). All ranking logic
//! lives in [`crate::brain`]; this module only moves rows.

use crate::models::KnowledgeEntry;
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Curated Q&A rows shipped with the bot, applied only to an empty store.
const SEED_JSON: &str = include_str!("../seed.json");

/// Shape of one seed row in `seed.json`.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    keyword: String,
    answer: String,
    category: String,
}

/// Open (creating if missing) the knowledge database, apply the schema and
/// seed it when empty.
pub async fn init_db(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let db_url = format!("sqlite://{}", db_path.to_string_lossy());

    info!("Initializing knowledge store at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS knowledge (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            keyword TEXT NOT NULL,
            answer TEXT NOT NULL,
            category TEXT NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await?;

    seed_if_empty(&pool).await?;

    info!("Knowledge store initialized.");

    Ok(pool)
}

/// Insert the shipped seed rows when the table is empty. Re-running against a
/// populated store is a no-op, so user-added entries are never duplicated.
async fn seed_if_empty(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM knowledge")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let seeds: Vec<SeedEntry> = serde_json::from_str(SEED_JSON)
        .map_err(|e| sqlx::Error::Configuration(format!("malformed seed data: {e}").into()))?;

    info!("Seeding knowledge store with {} entries", seeds.len());

    for seed in &seeds {
        sqlx::query("INSERT INTO knowledge (keyword, answer, category) VALUES (?, ?, ?)")
            .bind(&seed.keyword)
            .bind(&seed.answer)
            .bind(&seed.category)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Load every entry in id order. The engine calls this exactly once, lazily.
pub async fn load_entries(pool: &SqlitePool) -> Result<Vec<KnowledgeEntry>, sqlx::Error> {
    sqlx::query_as::<_, KnowledgeEntry>(
        r#"
        SELECT id, keyword, answer, category
        FROM knowledge
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Append a new entry and return the stored row, including its assigned id.
pub async fn insert_entry(
    pool: &SqlitePool,
    keyword: &str,
    answer: &str,
    category: &str,
) -> Result<KnowledgeEntry, sqlx::Error> {
    sqlx::query_as::<_, KnowledgeEntry>(
        r#"
        INSERT INTO knowledge (keyword, answer, category)
        VALUES (?, ?, ?)
        RETURNING id, keyword, answer, category
        "#,
    )
    .bind(keyword)
    .bind(answer)
    .bind(category)
    .fetch_one(pool)
    .await
}

/// All entries sharing a category, in id order.
pub async fn entries_by_category(
    pool: &SqlitePool,
    category: &str,
) -> Result<Vec<KnowledgeEntry>, sqlx::Error> {
    sqlx::query_as::<_, KnowledgeEntry>(
        r#"
        SELECT id, keyword, answer, category
        FROM knowledge
        WHERE category = ? COLLATE NOCASE
        ORDER BY id ASC
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}
