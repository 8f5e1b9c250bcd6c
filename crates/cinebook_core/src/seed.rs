//! Idempotent bootstrap for a fresh (or existing) store.
//!
//! # Responsibility
//! - Populate the film catalogue and reconcile both fixed-enumeration
//!   lookup tables.
//! - Ensure exactly one admin account exists, with ADMIN granted.
//!
//! # Invariants
//! - Running the whole routine twice produces the same final state, apart
//!   from the admin user's regenerated internal id.
//! - Lookup rows are reconciled (created or renamed in place), never
//!   deleted.

use crate::model::{PermissionGroup, TicketHolderType, User};
use crate::repo::lookup_repo::{self, LookupTable};
use crate::repo::{film_repo, user_repo, RepoResult};
use log::info;
use rusqlite::Connection;

/// The designated bootstrap admin account. Only admins can create more
/// admins, so one has to exist up front.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "123";

/// The fixed film catalogue.
pub const FILM_TITLES: [&str; 6] = [
    "Jurassic Cabin",
    "The Dark Night",
    "The Nightmare on First Street",
    "Quantum Mania",
    "The Game of Thorns",
    "The Shape of Time",
];

/// Seeds the store: catalogue films, lookup reconciliation, admin
/// reset-create plus ADMIN grant. Safe to run at every startup and
/// standalone on demand; returns the (re)created admin user.
pub fn run(conn: &Connection) -> RepoResult<User> {
    info!("event=seed module=seed status=start");

    for title in FILM_TITLES {
        film_repo::get_or_create(conn, title)?;
    }

    // Reconciliation walks the full enumerations; order does not matter
    // because every row is upserted independently.
    for group in PermissionGroup::ALL {
        lookup_repo::upsert(
            conn,
            LookupTable::PermissionGroups,
            group.id(),
            group.readable(),
        )?;
    }
    for kind in TicketHolderType::ALL {
        lookup_repo::upsert(
            conn,
            LookupTable::TicketHolderTypes,
            kind.id(),
            kind.readable(),
        )?;
    }

    // Reset-create: any previous admin row (and, via cascade, its grants)
    // goes away inside one transaction with the fresh insert, so the store
    // never holds zero admin accounts at a commit point.
    let admin = user_repo::delete_then_create(conn, ADMIN_USERNAME, ADMIN_PASSWORD)?;
    user_repo::grant_group(conn, admin.id, PermissionGroup::Admin)?;

    info!(
        "event=seed module=seed status=ok films={} admin_id={}",
        FILM_TITLES.len(),
        admin.id
    );
    Ok(admin)
}
