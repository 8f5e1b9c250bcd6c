//! Persistence for the two fixed-enumeration lookup tables.
//!
//! Both tables share a shape (small integer id, unique readable name) and
//! a lifecycle: rows are created once by the seed routine and afterwards
//! only reconciled in place. The operations here are parameterized over
//! which table they touch instead of duplicating per-table code.

use crate::model::LookupRow;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};

/// The lookup tables backed by compile-time enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    PermissionGroups,
    TicketHolderTypes,
}

impl LookupTable {
    fn table(self) -> &'static str {
        match self {
            Self::PermissionGroups => "permission_groups",
            Self::TicketHolderTypes => "ticket_holder_types",
        }
    }
}

/// Creates the row when absent, otherwise corrects its readable name in
/// place. A single statement, so a concurrent reader never observes the
/// row missing once it has existed.
pub fn upsert(
    conn: &Connection,
    table: LookupTable,
    id: i64,
    readable: &str,
) -> RepoResult<LookupRow> {
    conn.execute(
        &format!(
            "INSERT INTO {} (id, readable) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET readable = excluded.readable;",
            table.table()
        ),
        params![id, readable],
    )?;
    Ok(LookupRow {
        id,
        readable: readable.to_string(),
    })
}

/// Point lookup by id. A miss is `Ok(None)`.
pub fn get(conn: &Connection, table: LookupTable, id: i64) -> RepoResult<Option<LookupRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, readable FROM {} WHERE id = ?1;",
        table.table()
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(LookupRow {
            id: row.get("id")?,
            readable: row.get("readable")?,
        })),
        None => Ok(None),
    }
}

/// Finds the single row with this readable name, or `None`. Two matches
/// mean the unique constraint is broken and fail loudly.
pub fn find_by_readable(
    conn: &Connection,
    table: LookupTable,
    readable: &str,
) -> RepoResult<Option<LookupRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, readable FROM {} WHERE readable = ?1 LIMIT 2;",
        table.table()
    ))?;
    let mut rows = stmt.query(params![readable])?;

    let first = match rows.next()? {
        Some(row) => LookupRow {
            id: row.get("id")?,
            readable: row.get("readable")?,
        },
        None => return Ok(None),
    };
    if rows.next()?.is_some() {
        return Err(RepoError::MultipleMatches {
            table: table.table(),
            column: "readable",
            value: readable.to_string(),
        });
    }
    Ok(Some(first))
}

/// Every readable name, in id order.
pub fn list_readables(conn: &Connection, table: LookupTable) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT readable FROM {} ORDER BY id ASC;",
        table.table()
    ))?;
    let mut rows = stmt.query([])?;
    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        names.push(row.get("readable")?);
    }
    Ok(names)
}

/// Row count for the table.
pub fn count(conn: &Connection, table: LookupTable) -> RepoResult<i64> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {};", table.table()),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
