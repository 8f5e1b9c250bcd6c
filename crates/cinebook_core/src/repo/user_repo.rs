//! User persistence: registration, credential lookup, the admin
//! reset-create path, and permission-group grants.
//!
//! # Invariants
//! - `username` is unique across all time; a taken username is an
//!   anticipated outcome (`NewUser::UsernameTaken`), never a constraint
//!   violation surfaced from SQLite.
//! - `delete_then_create` is one transaction: a crash can never leave the
//!   store with the row deleted but not recreated.

use crate::model::{PermissionGroup, User, UserId};
use crate::repo::{find_unique, parse_uuid, RepoResult, Table};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

impl Table for User {
    const TABLE: &'static str = "users";
    const ID_COLUMN: &'static str = "id";
    const COLUMNS: &'static str = "id, username, password, contact_phone";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let id_text: String = row.get("id")?;
        Ok(Self {
            id: parse_uuid(&id_text, Self::TABLE, "id")?,
            username: row.get("username")?,
            password: row.get("password")?,
            contact_phone: row.get("contact_phone")?,
        })
    }
}

/// Outcome of an anticipated-duplicate user insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewUser {
    Created(User),
    UsernameTaken,
}

/// Finds the single user with this username, or `None`.
pub fn find_by_username(conn: &Connection, username: &str) -> RepoResult<Option<User>> {
    find_unique::<User>(conn, "username", username)
}

/// Finds the user matching this exact (username, password) pair.
///
/// Username uniqueness bounds the result to one row; a wrong password for
/// an existing username is the same `None` as an unknown username.
pub fn find_by_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> RepoResult<Option<User>> {
    match find_by_username(conn, username)? {
        Some(user) if user.password == password => Ok(Some(user)),
        _ => Ok(None),
    }
}

/// Inserts a new user unless the username is already taken.
pub fn create_user(conn: &Connection, username: &str, password: &str) -> RepoResult<NewUser> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    if find_by_username(&tx, username)?.is_some() {
        return Ok(NewUser::UsernameTaken);
    }

    let user = User::new(username, password);
    insert_user(&tx, &user)?;
    tx.commit()?;
    Ok(NewUser::Created(user))
}

/// Unconditionally removes any user with this username, then creates a
/// fresh row. One transaction; used only by the admin bootstrap.
///
/// The returned user carries a newly generated id even when a row with the
/// same username existed before.
pub fn delete_then_create(conn: &Connection, username: &str, password: &str) -> RepoResult<User> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    tx.execute("DELETE FROM users WHERE username = ?1;", params![username])?;

    let user = User::new(username, password);
    insert_user(&tx, &user)?;
    tx.commit()?;
    Ok(user)
}

/// Grants a permission group to a user. Granting a group the user already
/// holds is a no-op; the composite primary key keeps the pair unique.
pub fn grant_group(conn: &Connection, user_id: UserId, group: PermissionGroup) -> RepoResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO user_permission_groups (user_id, permission_group_id)
         VALUES (?1, ?2);",
        params![user_id.to_string(), group.id()],
    )?;
    Ok(())
}

/// Readable names of every permission group held by the user, in id order.
pub fn permission_groups_for(conn: &Connection, user_id: UserId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT pg.readable
         FROM user_permission_groups upg
         JOIN permission_groups pg ON pg.id = upg.permission_group_id
         WHERE upg.user_id = ?1
         ORDER BY pg.id ASC;",
    )?;
    let mut rows = stmt.query(params![user_id.to_string()])?;
    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        names.push(row.get("readable")?);
    }
    Ok(names)
}

/// Removes one user. Grants cascade away with the row; bookings survive
/// with their user reference cleared. Returns whether a row was removed.
pub fn delete_by_id(conn: &Connection, user_id: UserId) -> RepoResult<bool> {
    let deleted = conn.execute(
        "DELETE FROM users WHERE id = ?1;",
        params![user_id.to_string()],
    )?;
    Ok(deleted > 0)
}

/// Number of grants held by the user, across all groups.
pub fn grant_count_for(conn: &Connection, user_id: UserId) -> RepoResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM user_permission_groups WHERE user_id = ?1;",
        params![user_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn insert_user(conn: &Connection, user: &User) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO users (id, username, password, contact_phone)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            user.id.to_string(),
            user.username,
            user.password,
            user.contact_phone.as_deref(),
        ],
    )?;
    Ok(())
}
