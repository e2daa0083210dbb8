//! Link Manager for newtab.
//!
//! Implements `LinkManagerTrait`: CRUD operations for links and the
//! position-based ordering, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::types::errors::LinkError;
use crate::types::link::{truncate_name, Direction, Link, MoveOutcome};

/// Position a link is parked at while two positions are exchanged.
/// Valid positions are never negative.
const SWAP_SENTINEL: i64 = -1;

const LINK_COLUMNS: &str = "id, name, href, img, position";

/// Trait defining link store operations.
pub trait LinkManagerTrait {
    fn add_link(&mut self, name: Option<&str>, href: &str, img: Option<&str>) -> Result<i64, LinkError>;
    fn update_link(&mut self, id: i64, name: Option<&str>, href: &str, img: Option<&str>) -> Result<(), LinkError>;
    /// Returns whether a row was removed. Unknown ids are not an error.
    fn delete_link(&mut self, id: i64) -> Result<bool, LinkError>;
    fn get_link(&self, id: i64) -> Result<Option<Link>, LinkError>;
    fn list_links(&self) -> Result<Vec<Link>, LinkError>;
    fn search_links(&self, query: &str) -> Result<Vec<Link>, LinkError>;
    fn max_position(&self) -> Result<Option<i64>, LinkError>;
    fn move_link(&mut self, id: i64, direction: Direction) -> Result<MoveOutcome, LinkError>;
    /// Stores a resolved icon only if the link still has none.
    fn store_resolved_icon(&mut self, id: i64, img: &str) -> Result<bool, LinkError>;
}

/// Link manager backed by a SQLite connection.
pub struct LinkManager<'a> {
    conn: &'a Connection,
}

impl<'a> LinkManager<'a> {
    /// Creates a new `LinkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Computes the position for a new link: one past the current maximum, 0 when empty.
    fn next_position(&self) -> Result<i64, LinkError> {
        Ok(self.max_position()?.map_or(0, |max| max + 1))
    }

    /// Reads a single `Link` row into a struct.
    fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
        Ok(Link {
            id: row.get(0)?,
            name: row.get(1)?,
            href: row.get(2)?,
            img: row.get(3)?,
            position: row.get(4)?,
        })
    }

    fn collect(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Link>, LinkError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_link)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}

/// Escapes LIKE wildcards so `query` matches literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl<'a> LinkManagerTrait for LinkManager<'a> {
    /// Adds a new link at the end of the list. Returns the assigned ID.
    fn add_link(&mut self, name: Option<&str>, href: &str, img: Option<&str>) -> Result<i64, LinkError> {
        if href.is_empty() {
            return Err(LinkError::InvalidHref);
        }
        let name = name.map(truncate_name);
        let position = self.next_position()?;

        self.conn.execute(
            "INSERT INTO links (name, href, img, position) VALUES (?1, ?2, ?3, ?4)",
            params![name, href, img, position],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, position, "link added");
        Ok(id)
    }

    /// Replaces name, href and img. `img = None` clears the icon.
    fn update_link(&mut self, id: i64, name: Option<&str>, href: &str, img: Option<&str>) -> Result<(), LinkError> {
        if href.is_empty() {
            return Err(LinkError::InvalidHref);
        }
        let name = name.map(truncate_name);
        let affected = self.conn.execute(
            "UPDATE links SET name = ?1, href = ?2, img = ?3 WHERE id = ?4",
            params![name, href, img, id],
        )?;

        if affected == 0 {
            return Err(LinkError::NotFound(id));
        }
        Ok(())
    }

    fn delete_link(&mut self, id: i64) -> Result<bool, LinkError> {
        let affected = self
            .conn
            .execute("DELETE FROM links WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn get_link(&self, id: i64) -> Result<Option<Link>, LinkError> {
        let sql = format!("SELECT {} FROM links WHERE id = ?1", LINK_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id], Self::row_to_link)
            .optional()?)
    }

    /// Lists all links in display order.
    fn list_links(&self) -> Result<Vec<Link>, LinkError> {
        let sql = format!("SELECT {} FROM links ORDER BY position, id", LINK_COLUMNS);
        self.collect(&sql, params![])
    }

    /// Case-insensitive substring search over name and URL, in display order.
    fn search_links(&self, query: &str) -> Result<Vec<Link>, LinkError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_links();
        }
        let pattern = like_pattern(query);
        let sql = format!(
            "SELECT {} FROM links \
             WHERE name LIKE ?1 ESCAPE '\\' OR href LIKE ?1 ESCAPE '\\' \
             ORDER BY position, id",
            LINK_COLUMNS
        );
        self.collect(&sql, params![pattern])
    }

    fn max_position(&self) -> Result<Option<i64>, LinkError> {
        Ok(self
            .conn
            .query_row("SELECT MAX(position) FROM links", [], |row| row.get(0))?)
    }

    /// Swaps the link with its nearest neighbour in `direction`.
    ///
    /// The moving row is parked at [`SWAP_SENTINEL`] first so no two rows
    /// share a position at any point, even with eager uniqueness checks.
    /// Dropping the transaction on an early return rolls everything back.
    fn move_link(&mut self, id: i64, direction: Direction) -> Result<MoveOutcome, LinkError> {
        let tx = self.conn.unchecked_transaction()?;

        let current: Option<i64> = tx
            .query_row("SELECT position FROM links WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        let Some(current) = current else {
            return Ok(MoveOutcome::NotFound);
        };

        let neighbour_sql = match direction {
            Direction::Up => {
                "SELECT id, position FROM links WHERE position < ?1 ORDER BY position DESC, id DESC LIMIT 1"
            }
            Direction::Down => {
                "SELECT id, position FROM links WHERE position > ?1 ORDER BY position ASC, id ASC LIMIT 1"
            }
        };
        let neighbour: Option<(i64, i64)> = tx
            .query_row(neighbour_sql, params![current], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        let Some((neighbour_id, neighbour_position)) = neighbour else {
            return Ok(MoveOutcome::AtBoundary);
        };

        tx.execute("UPDATE links SET position = ?1 WHERE id = ?2", params![SWAP_SENTINEL, id])?;
        tx.execute("UPDATE links SET position = ?1 WHERE id = ?2", params![current, neighbour_id])?;
        tx.execute("UPDATE links SET position = ?1 WHERE id = ?2", params![neighbour_position, id])?;
        tx.commit()?;

        debug!(id, neighbour_id, %direction, "link moved");
        Ok(MoveOutcome::Moved)
    }

    fn store_resolved_icon(&mut self, id: i64, img: &str) -> Result<bool, LinkError> {
        let affected = self.conn.execute(
            "UPDATE links SET img = ?1 WHERE id = ?2 AND img IS NULL",
            params![img, id],
        )?;
        Ok(affected > 0)
    }
}
