//! newtab database layer.
//!
//! Provides SQLite connection management, file validation and schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use newtab::database::Database;
//!
//! // Open a persistent database
//! let db = Database::open("identifier.sqlite").expect("failed to open database");
//! db.verify_schema().expect("links table missing");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//!
//! // Access the underlying connection for queries
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
