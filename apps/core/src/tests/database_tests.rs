//! Knowledge Store Tests
//!
//! Schema creation, idempotent seeding and the row operations the engine
//! depends on, all against a temporary on-disk SQLite file.

use crate::database;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

/// Create a seeded store in a temp directory. The directory guard must stay
/// alive for as long as the pool is used.
async fn create_test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let pool = database::init_db(&db_path)
        .await
        .expect("Failed to init test store");
    (pool, dir)
}

#[tokio::test]
async fn test_seed_applied_in_id_order() {
    let (pool, _dir) = create_test_pool().await;

    let entries = database::load_entries(&pool)
        .await
        .expect("Failed to load entries");

    assert!(!entries.is_empty(), "seed rows expected in a fresh store");
    assert!(
        entries.windows(2).all(|w| w[0].id < w[1].id),
        "entries must come back in strictly increasing id order"
    );
    assert!(entries.iter().any(|e| e.keyword == "phishing"));
    assert!(entries.iter().any(|e| e.category == "General"));
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");

    let pool = database::init_db(&db_path)
        .await
        .expect("Failed to init test store");
    let first = database::load_entries(&pool)
        .await
        .expect("Failed to load entries")
        .len();
    pool.close().await;

    // Re-opening an already seeded store must not duplicate rows.
    let pool = database::init_db(&db_path)
        .await
        .expect("Failed to re-init test store");
    let second = database::load_entries(&pool)
        .await
        .expect("Failed to load entries")
        .len();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_insert_returns_assigned_id() {
    let (pool, _dir) = create_test_pool().await;

    let before = database::load_entries(&pool)
        .await
        .expect("Failed to load entries");
    let max_id = before.iter().map(|e| e.id).max().unwrap_or(0);

    let inserted = database::insert_entry(&pool, "quokka", "Quokkas are secure.", "General")
        .await
        .expect("Failed to insert entry");

    assert!(inserted.id > max_id, "new row id must be monotonic");
    assert_eq!(inserted.keyword, "quokka");
    assert_eq!(inserted.category, "General");

    let after = database::load_entries(&pool)
        .await
        .expect("Failed to load entries");
    assert_eq!(after.len(), before.len() + 1);
    assert!(after.iter().any(|e| e.id == inserted.id));
}

#[tokio::test]
async fn test_entries_by_category() {
    let (pool, _dir) = create_test_pool().await;

    let phishing = database::entries_by_category(&pool, "Phishing")
        .await
        .expect("Failed to query by category");

    assert_eq!(phishing.len(), 3);
    assert!(phishing.windows(2).all(|w| w[0].id < w[1].id));
    assert!(phishing.iter().all(|e| e.category == "Phishing"));

    // Category lookup is case-insensitive.
    let lower = database::entries_by_category(&pool, "phishing")
        .await
        .expect("Failed to query by category");
    assert_eq!(lower.len(), phishing.len());

    let missing = database::entries_by_category(&pool, "Nonexistent")
        .await
        .expect("Failed to query by category");
    assert!(missing.is_empty());
}
