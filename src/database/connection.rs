//! SQLite database connection management for newtab.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`,
//! validates existing database files and runs schema migrations on open.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::migrations;
use crate::types::errors::DatabaseError;

/// Magic string at the start of every SQLite 3 database file.
const SQLITE_HEADER: &[u8] = b"SQLite format 3";

/// Table that must exist before the service accepts traffic.
pub const LINKS_TABLE: &str = "links";

/// Core database wrapper providing SQLite connection management.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and runs migrations.
    ///
    /// An existing non-empty file must start with the SQLite header; anything
    /// else is rejected before SQLite gets a chance to touch it.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the file is invalid, the connection cannot be
    /// established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        prepare_file(path)?;

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;

        let db = Self { conn };
        db.run_migrations()?;
        info!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Opens an in-memory SQLite database and runs migrations.
    ///
    /// Useful for testing. The database is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_all(&self.conn)?;
        Ok(())
    }

    /// Health check run at startup: the `links` table must be present.
    pub fn verify_schema(&self) -> Result<(), DatabaseError> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![LINKS_TABLE],
                |row| row.get(0),
            )
            .optional()?;

        match found.as_deref() {
            Some(LINKS_TABLE) => {
                debug!(table = LINKS_TABLE, "schema verified");
                Ok(())
            }
            _ => Err(DatabaseError::MissingTable(LINKS_TABLE.to_string())),
        }
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Validates an existing database file, or creates its parent directory.
fn prepare_file(path: &Path) -> Result<(), DatabaseError> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => Err(DatabaseError::NotAFile(path.display().to_string())),
        // Empty files are initialised by SQLite like a missing one.
        Ok(meta) if meta.len() == 0 => Ok(()),
        Ok(_) => check_header(path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            info!(path = %path.display(), "database file absent, creating a new one");
            Ok(())
        }
        Err(e) => Err(DatabaseError::Io(e)),
    }
}

fn check_header(path: &Path) -> Result<(), DatabaseError> {
    let mut header = [0u8; 16];
    let mut file = File::open(path)?;
    let read = file.read(&mut header)?;
    if read < SQLITE_HEADER.len() || &header[..SQLITE_HEADER.len()] != SQLITE_HEADER {
        return Err(DatabaseError::InvalidHeader(path.display().to_string()));
    }
    Ok(())
}
