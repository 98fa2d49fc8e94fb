#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_current_version() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.set(STORAGE_KEY, "{}").unwrap();
    db.migrate().unwrap();
    db.migrate().unwrap();
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(db.get(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
}

// ── Key/value ─────────────────────────────────────────────────

#[test]
fn test_get_missing_key() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get("nope").unwrap().is_none());
}

#[test]
fn test_set_then_get() {
    let mut db = Database::open_in_memory().unwrap();
    db.set("a", "first").unwrap();
    assert_eq!(db.get("a").unwrap().as_deref(), Some("first"));
}

#[test]
fn test_set_overwrites() {
    let mut db = Database::open_in_memory().unwrap();
    db.set("a", "first").unwrap();
    db.set("a", "second").unwrap();
    assert_eq!(db.get("a").unwrap().as_deref(), Some("second"));
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_set_records_write_time() {
    let mut db = Database::open_in_memory().unwrap();
    db.set("a", "x").unwrap();
    let stamp: String = db
        .conn
        .query_row("SELECT updated_at FROM kv WHERE key = 'a'", [], |row| row.get(0))
        .unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
}

#[test]
fn test_remove() {
    let mut db = Database::open_in_memory().unwrap();
    db.set("a", "x").unwrap();
    db.set("b", "y").unwrap();
    db.remove("a").unwrap();
    assert!(db.get("a").unwrap().is_none());
    assert_eq!(db.get("b").unwrap().as_deref(), Some("y"));
}

#[test]
fn test_remove_missing_key_is_ok() {
    let mut db = Database::open_in_memory().unwrap();
    db.remove("never-written").unwrap();
}

#[test]
fn test_on_disk_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budgetbox.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.set(STORAGE_KEY, r#"{"hello":"world"}"#).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(
        db.get(STORAGE_KEY).unwrap().as_deref(),
        Some(r#"{"hello":"world"}"#)
    );
}
