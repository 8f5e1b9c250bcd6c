//! The access/auth facade over the repository layer.

use crate::model::{BookingId, User, UserId};
use crate::repo::booking_repo::{self, CreateBooking};
use crate::repo::lookup_repo::{self, LookupTable};
use crate::repo::{film_repo, user_repo, RepoResult};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

/// Read projection of one user: everything the menu layer shows after a
/// successful login, and never the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub contact_phone: Option<String>,
    /// Readable permission-group names, in group-id order. Callers gate
    /// admin-only operations on membership of `"ADMIN"` here.
    pub permission_groups: Vec<String>,
    pub bookings: Vec<BookingSummary>,
}

/// One booking as listed to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub film: String,
    pub show_at_ms: i64,
}

/// Receipt for a successfully created booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: BookingId,
    pub film: String,
    pub show_at_ms: i64,
    pub ticket_count: usize,
}

/// Outcome of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(UserView),
    InvalidCredentials,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(UserView),
    UsernameTaken,
}

/// Outcome of a booking creation attempt through the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Confirmed(BookingConfirmation),
    FilmNotFound,
    UserNotFound,
    UnknownHolderType(String),
    NoTicketSpecs,
}

/// The facade owning the store's single connection for process lifetime.
///
/// Constructed once at startup from an opened connection; everything the
/// menu layer does goes through these methods.
pub struct Access {
    conn: Connection,
}

impl Access {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read-only handle to the underlying connection, for maintenance
    /// tooling and tests. The menu layer has no business calling this.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checks an exact (username, password) pair and returns the user's
    /// read projection on success.
    pub fn authenticate(&self, username: &str, password: &str) -> RepoResult<AuthOutcome> {
        match user_repo::find_by_credentials(&self.conn, username, password)? {
            Some(user) => {
                info!("event=auth module=service status=ok username={username}");
                Ok(AuthOutcome::Authenticated(self.view_of(&user)?))
            }
            None => {
                info!("event=auth module=service status=rejected username={username}");
                Ok(AuthOutcome::InvalidCredentials)
            }
        }
    }

    /// Registers a new account. A taken username is an anticipated outcome
    /// and leaves the store untouched.
    pub fn register(&self, username: &str, password: &str) -> RepoResult<RegisterOutcome> {
        match user_repo::create_user(&self.conn, username, password)? {
            user_repo::NewUser::Created(user) => {
                info!("event=register module=service status=ok username={username}");
                Ok(RegisterOutcome::Registered(self.view_of(&user)?))
            }
            user_repo::NewUser::UsernameTaken => {
                info!("event=register module=service status=taken username={username}");
                Ok(RegisterOutcome::UsernameTaken)
            }
        }
    }

    /// Every catalogue film title.
    pub fn list_film_titles(&self) -> RepoResult<Vec<String>> {
        film_repo::list_titles(&self.conn)
    }

    /// Every ticket-holder-type readable name, in id order.
    pub fn list_ticket_holder_type_names(&self) -> RepoResult<Vec<String>> {
        lookup_repo::list_readables(&self.conn, LookupTable::TicketHolderTypes)
    }

    /// Creates a booking with one ticket per holder-type name. Either the
    /// whole booking persists or nothing does.
    pub fn create_booking(
        &self,
        user_id: UserId,
        show_at_ms: i64,
        film_title: &str,
        holder_type_names: &[String],
    ) -> RepoResult<BookingOutcome> {
        let outcome = booking_repo::create_booking(
            &self.conn,
            user_id,
            film_title,
            show_at_ms,
            holder_type_names,
        )?;
        Ok(match outcome {
            CreateBooking::Created(booking) => BookingOutcome::Confirmed(BookingConfirmation {
                booking_id: booking.id,
                film: booking.film_title,
                show_at_ms: booking.show_at_ms,
                ticket_count: holder_type_names.len(),
            }),
            CreateBooking::FilmNotFound => BookingOutcome::FilmNotFound,
            CreateBooking::UserNotFound => BookingOutcome::UserNotFound,
            CreateBooking::UnknownHolderType(name) => BookingOutcome::UnknownHolderType(name),
            CreateBooking::NoTicketSpecs => BookingOutcome::NoTicketSpecs,
        })
    }

    /// Bookings made by one user, as summaries.
    pub fn list_bookings_for_user(&self, user_id: UserId) -> RepoResult<Vec<BookingSummary>> {
        let bookings = booking_repo::list_for_user(&self.conn, user_id)?;
        Ok(bookings
            .into_iter()
            .map(|booking| BookingSummary {
                film: booking.film_title,
                show_at_ms: booking.show_at_ms,
            })
            .collect())
    }

    /// Every booking in the store.
    ///
    /// Callers must have verified ADMIN membership on their `UserView`
    /// before invoking this; the facade deliberately does not re-check.
    pub fn list_all_bookings(&self) -> RepoResult<Vec<BookingSummary>> {
        let bookings = booking_repo::list_all(&self.conn)?;
        Ok(bookings
            .into_iter()
            .map(|booking| BookingSummary {
                film: booking.film_title,
                show_at_ms: booking.show_at_ms,
            })
            .collect())
    }

    fn view_of(&self, user: &User) -> RepoResult<UserView> {
        Ok(UserView {
            id: user.id,
            username: user.username.clone(),
            contact_phone: user.contact_phone.clone(),
            permission_groups: user_repo::permission_groups_for(&self.conn, user.id)?,
            bookings: self.list_bookings_for_user(user.id)?,
        })
    }
}
