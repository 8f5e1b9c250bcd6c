//! Repository layer: typed CRUD and the transactional multi-row writes.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Provide a small generic surface (`get_by_id`, `delete_all`,
//!   `count_all`) over a `Table` trait, plus per-entity free functions for
//!   the specialized queries.
//!
//! # Invariants
//! - Expected misses (no row) are `Ok(None)`, never errors.
//! - A second row matching a unique column is `RepoError::MultipleMatches`:
//!   the schema is corrupt and the fault propagates instead of being
//!   swallowed.
//! - Multi-row writes commit fully or not at all.

use crate::db::DbError;
use rusqlite::{params, Connection, Row, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod booking_repo;
pub mod film_repo;
pub mod lookup_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository operations. All variants are unexpected faults;
/// anticipated conditions (missing row, taken username, unresolvable
/// booking input) are returned as values by the individual operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// More than one row matched a column declared unique. Indicates a
    /// broken uniqueness constraint, treated as fatal.
    MultipleMatches {
        table: &'static str,
        column: &'static str,
        value: String,
    },
    /// Persisted data cannot be converted to a valid domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MultipleMatches {
                table,
                column,
                value,
            } => write!(
                f,
                "multiple rows in `{table}` match unique column `{column}` = `{value}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MultipleMatches { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Mapping between one persisted table and its domain record.
///
/// Entities implement this to get the generic point lookup and the bulk
/// maintenance operations for free; everything specialized lives in the
/// per-entity modules.
pub trait Table: Sized {
    /// Table name in the schema.
    const TABLE: &'static str;
    /// Primary-key column name.
    const ID_COLUMN: &'static str;
    /// Select list matching `from_row`'s expectations.
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Point lookup by primary key. A miss is `Ok(None)`.
pub fn get_by_id<T: Table>(conn: &Connection, id: impl ToSql) -> RepoResult<Option<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1;",
        T::COLUMNS,
        T::TABLE,
        T::ID_COLUMN
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(T::from_row(row)?)),
        None => Ok(None),
    }
}

/// Deletes every row in the table. Used only by maintenance/reset flows.
pub fn delete_all<T: Table>(conn: &Connection) -> RepoResult<usize> {
    let deleted = conn.execute(&format!("DELETE FROM {};", T::TABLE), [])?;
    Ok(deleted)
}

/// Counts every row in the table.
pub fn count_all<T: Table>(conn: &Connection) -> RepoResult<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {};", T::TABLE), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}

/// Finds the single row where `column` equals `value`.
///
/// Returns `Ok(None)` on a miss and fails loudly with `MultipleMatches`
/// when two rows share a value the schema declares unique.
pub(crate) fn find_unique<T: Table>(
    conn: &Connection,
    column: &'static str,
    value: impl ToSql + Display,
) -> RepoResult<Option<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {column} = ?1 LIMIT 2;",
        T::COLUMNS,
        T::TABLE
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![value])?;

    let first = match rows.next()? {
        Some(row) => T::from_row(row)?,
        None => return Ok(None),
    };
    if rows.next()?.is_some() {
        return Err(RepoError::MultipleMatches {
            table: T::TABLE,
            column,
            value: value.to_string(),
        });
    }
    Ok(Some(first))
}

/// Parses a stored UUID column, rejecting corrupt values instead of
/// masking them.
pub(crate) fn parse_uuid(text: &str, table: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}
