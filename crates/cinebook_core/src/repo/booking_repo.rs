//! Booking and ticket persistence, including the one multi-row write at
//! the heart of the store: a booking plus its tickets, committed together
//! or not at all.
//!
//! # Invariants
//! - A booking with zero tickets is never persisted as the side effect of
//!   a failed creation.
//! - Ticket prices are recorded at creation and never recomputed.

use crate::model::{Booking, BookingId, Ticket, User, UserId};
use crate::repo::{
    film_repo, get_by_id, lookup_repo, lookup_repo::LookupTable, parse_uuid, RepoResult, Table,
};
use log::info;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

/// Placeholder charge per ticket, in pence. A known simplification: the
/// store records what was paid but owns no pricing logic.
pub const TICKET_PRICE_PENCE: i64 = 500;

impl Table for Booking {
    const TABLE: &'static str = "bookings";
    const ID_COLUMN: &'static str = "id";
    const COLUMNS: &'static str = "id, user_id, film_title, show_at_ms";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let id_text: String = row.get("id")?;
        let user_id = match row.get::<_, Option<String>>("user_id")? {
            Some(text) => Some(parse_uuid(&text, Self::TABLE, "user_id")?),
            None => None,
        };
        Ok(Self {
            id: parse_uuid(&id_text, Self::TABLE, "id")?,
            user_id,
            film_title: row.get("film_title")?,
            show_at_ms: row.get("show_at_ms")?,
        })
    }
}

impl Table for Ticket {
    const TABLE: &'static str = "tickets";
    const ID_COLUMN: &'static str = "id";
    const COLUMNS: &'static str = "id, booking_id, holder_name, holder_type_id, paid_price_pence";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let id_text: String = row.get("id")?;
        let booking_text: String = row.get("booking_id")?;
        Ok(Self {
            id: parse_uuid(&id_text, Self::TABLE, "id")?,
            booking_id: parse_uuid(&booking_text, Self::TABLE, "booking_id")?,
            holder_name: row.get("holder_name")?,
            holder_type_id: row.get("holder_type_id")?,
            paid_price_pence: row.get("paid_price_pence")?,
        })
    }
}

/// Outcome of a booking creation attempt. The validation variants are
/// anticipated conditions: whichever occurs, no row was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBooking {
    Created(Booking),
    FilmNotFound,
    UserNotFound,
    /// A ticket spec named a holder type absent from the lookup table.
    /// The whole transaction was rolled back, booking row included.
    UnknownHolderType(String),
    /// A booking needs at least one ticket; nothing was attempted.
    NoTicketSpecs,
}

/// Creates one booking and one ticket per holder-type name, atomically.
///
/// Film and user are resolved first; either miss aborts before any write.
/// The booking insert and every ticket insert then run inside a single
/// transaction, so a holder-type name that fails to resolve rolls the
/// booking back too.
pub fn create_booking(
    conn: &Connection,
    user_id: UserId,
    film_title: &str,
    show_at_ms: i64,
    holder_type_names: &[String],
) -> RepoResult<CreateBooking> {
    if film_repo::find_by_title(conn, film_title)?.is_none() {
        return Ok(CreateBooking::FilmNotFound);
    }
    if get_by_id::<User>(conn, user_id.to_string())?.is_none() {
        return Ok(CreateBooking::UserNotFound);
    }
    if holder_type_names.is_empty() {
        return Ok(CreateBooking::NoTicketSpecs);
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        user_id: Some(user_id),
        film_title: film_title.to_string(),
        show_at_ms,
    };

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    tx.execute(
        "INSERT INTO bookings (id, user_id, film_title, show_at_ms)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            booking.id.to_string(),
            user_id.to_string(),
            booking.film_title,
            booking.show_at_ms,
        ],
    )?;

    for name in holder_type_names {
        let resolved = lookup_repo::find_by_readable(&tx, LookupTable::TicketHolderTypes, name)?;
        let holder_type = match resolved {
            Some(row) => row,
            // Dropping the transaction rolls back the booking insert and
            // any tickets written so far.
            None => return Ok(CreateBooking::UnknownHolderType(name.clone())),
        };

        tx.execute(
            "INSERT INTO tickets (id, booking_id, holder_name, holder_type_id, paid_price_pence)
             VALUES (?1, ?2, NULL, ?3, ?4);",
            params![
                Uuid::new_v4().to_string(),
                booking.id.to_string(),
                holder_type.id,
                TICKET_PRICE_PENCE,
            ],
        )?;
    }

    tx.commit()?;
    info!(
        "event=booking_create module=repo status=ok booking_id={} film={} tickets={}",
        booking.id,
        booking.film_title,
        holder_type_names.len()
    );
    Ok(CreateBooking::Created(booking))
}

/// Every booking made by this user, ordered by showing time.
pub fn list_for_user(conn: &Connection, user_id: UserId) -> RepoResult<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM bookings WHERE user_id = ?1 ORDER BY show_at_ms ASC, id ASC;",
        Booking::COLUMNS
    ))?;
    let mut rows = stmt.query(params![user_id.to_string()])?;
    collect_bookings(&mut rows)
}

/// Every booking in the store, ordered by showing time. Callers are
/// expected to have verified ADMIN membership before invoking this; the
/// repository does not gate it.
pub fn list_all(conn: &Connection) -> RepoResult<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM bookings ORDER BY show_at_ms ASC, id ASC;",
        Booking::COLUMNS
    ))?;
    let mut rows = stmt.query([])?;
    collect_bookings(&mut rows)
}

/// Every ticket belonging to one booking.
pub fn tickets_for_booking(conn: &Connection, booking_id: BookingId) -> RepoResult<Vec<Ticket>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM tickets WHERE booking_id = ?1 ORDER BY id ASC;",
        Ticket::COLUMNS
    ))?;
    let mut rows = stmt.query(params![booking_id.to_string()])?;
    let mut tickets = Vec::new();
    while let Some(row) = rows.next()? {
        tickets.push(Ticket::from_row(row)?);
    }
    Ok(tickets)
}

fn collect_bookings(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Booking>> {
    let mut bookings = Vec::new();
    while let Some(row) = rows.next()? {
        bookings.push(Booking::from_row(row)?);
    }
    Ok(bookings)
}
