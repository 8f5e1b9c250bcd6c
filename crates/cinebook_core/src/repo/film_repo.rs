//! Film catalogue persistence. Titles are the natural key, so most of the
//! surface is title-based lookups.

use crate::model::Film;
use crate::repo::{find_unique, RepoResult, Table};
use rusqlite::{params, Connection, Row};

impl Table for Film {
    const TABLE: &'static str = "films";
    const ID_COLUMN: &'static str = "title";
    const COLUMNS: &'static str = "title";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            title: row.get("title")?,
        })
    }
}

/// Finds the single film with this title, or `None`.
pub fn find_by_title(conn: &Connection, title: &str) -> RepoResult<Option<Film>> {
    find_unique::<Film>(conn, "title", title)
}

/// Returns the existing film with this title, creating it when absent.
/// Used by the seed routine; safe to repeat.
pub fn get_or_create(conn: &Connection, title: &str) -> RepoResult<Film> {
    conn.execute(
        "INSERT OR IGNORE INTO films (title) VALUES (?1);",
        params![title],
    )?;
    Ok(Film {
        title: title.to_string(),
    })
}

/// Every catalogue title, in insertion order.
pub fn list_titles(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT title FROM films ORDER BY rowid ASC;")?;
    let mut rows = stmt.query([])?;
    let mut titles = Vec::new();
    while let Some(row) = rows.next()? {
        titles.push(row.get("title")?);
    }
    Ok(titles)
}

/// Removes one film. Cascades to every booking of that film and, through
/// bookings, to their tickets. Returns whether a row was removed.
pub fn delete_by_title(conn: &Connection, title: &str) -> RepoResult<bool> {
    let deleted = conn.execute("DELETE FROM films WHERE title = ?1;", params![title])?;
    Ok(deleted > 0)
}
