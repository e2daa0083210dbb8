//! Unit tests for the newtab database layer (connection, validation, migrations).

use std::fs;

use newtab::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use newtab::database::Database;
use newtab::types::errors::DatabaseError;
use rusqlite::Connection;
use tempfile::TempDir;

fn table_exists(conn: &Connection, name: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
        [name],
        |row| row.get(0),
    )
    .unwrap_or(false)
}

#[test]
fn test_open_in_memory_creates_links_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert!(table_exists(db.connection(), "links"));
    assert!(db.verify_schema().is_ok());
}

#[test]
fn test_migrations_record_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_position_index_exists() {
    let db = Database::open_in_memory().unwrap();
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_links_position'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists);
}

#[test]
fn test_href_not_null_enforced_by_schema() {
    let db = Database::open_in_memory().unwrap();
    let result = db.connection().execute(
        "INSERT INTO links (name, href, img, position) VALUES ('x', NULL, NULL, 0)",
        [],
    );
    assert!(result.is_err(), "NULL href must be rejected by the table");
}

#[test]
fn test_open_creates_missing_file_and_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("identifier.sqlite");

    let db = Database::open(&path).expect("open should create the file");
    db.verify_schema().unwrap();
    assert!(path.exists());
}

#[test]
fn test_reopen_keeps_data_and_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("identifier.sqlite");
    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute("INSERT INTO links (name, href, position) VALUES ('a', 'https://a.example', 0)", [])
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_invalid_header_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("identifier.sqlite");
    fs::write(&path, b"this is definitely not a database file").unwrap();

    match Database::open(&path) {
        Err(DatabaseError::InvalidHeader(p)) => assert!(p.contains("identifier.sqlite")),
        Err(other) => panic!("expected InvalidHeader, got {other}"),
        Ok(_) => panic!("expected InvalidHeader, got a database"),
    }
}

#[test]
fn test_short_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("identifier.sqlite");
    fs::write(&path, b"SQLite").unwrap();
    assert!(matches!(Database::open(&path), Err(DatabaseError::InvalidHeader(_))));
}

#[test]
fn test_empty_file_is_initialised() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("identifier.sqlite");
    fs::write(&path, b"").unwrap();

    let db = Database::open(&path).expect("empty file should be initialised");
    assert!(db.verify_schema().is_ok());
}

#[test]
fn test_directory_path_is_rejected() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(Database::open(tmp.path()), Err(DatabaseError::NotAFile(_))));
}

#[test]
fn test_legacy_database_without_schema_version_is_adopted() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("identifier.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                href TEXT NOT NULL,
                img TEXT,
                position INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO links (name, href, img, position) VALUES ('old', 'https://old.example', NULL, 3);",
        )
        .unwrap();
    }

    let db = Database::open(&path).expect("legacy database should open");
    db.verify_schema().unwrap();
    let position: i64 = db
        .connection()
        .query_row("SELECT position FROM links WHERE name = 'old'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(position, 3);
}

#[test]
fn test_verify_schema_fails_without_links_table() {
    let db = Database::open_in_memory().unwrap();
    db.connection().execute_batch("DROP TABLE links;").unwrap();

    match db.verify_schema() {
        Err(DatabaseError::MissingTable(table)) => assert_eq!(table, "links"),
        other => panic!("expected MissingTable, got {:?}", other.err()),
    }
}
