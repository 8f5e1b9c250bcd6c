//! Persisted row shapes for users, films, bookings and tickets.

use uuid::Uuid;

/// Stable identifier for a user row.
pub type UserId = Uuid;

/// Stable identifier for a booking row.
pub type BookingId = Uuid;

/// Stable identifier for a ticket row.
pub type TicketId = Uuid;

/// A registered account.
///
/// The password is held verbatim: credential hashing is explicitly out of
/// scope for this store. Callers that build read models must never copy the
/// field out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub contact_phone: Option<String>,
}

impl User {
    /// Creates a new user row with a generated stable id.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password: password.into(),
            contact_phone: None,
        }
    }
}

/// A catalogue film. The title is the natural key; there is no surrogate id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub title: String,
}

/// A booking made by a user for one showing of a film.
///
/// `user_id` is `None` once the owning user has been deleted: the booking
/// itself is a historical record and outlives the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: Option<UserId>,
    pub film_title: String,
    /// Showing datetime, Unix epoch milliseconds.
    pub show_at_ms: i64,
}

/// A single ticket within a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    pub booking_id: BookingId,
    pub holder_name: Option<String>,
    /// Row id in `ticket_holder_types`.
    pub holder_type_id: i64,
    /// Amount charged at booking time, in pence. Recorded once and never
    /// recomputed, so later catalogue price changes cannot skew refunds.
    pub paid_price_pence: i64,
}
