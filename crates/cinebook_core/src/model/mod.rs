//! Domain records for the booking store.
//!
//! # Responsibility
//! - Define the canonical row shapes persisted by the repository layer.
//! - Define the two fixed enumerations backing the lookup tables.
//!
//! # Invariants
//! - Row ids are stable and never reused once issued.
//! - Lookup enumerations are compile-time lists; the tables are reconciled
//!   against them, never freely extended at runtime.

pub mod lookup;
pub mod record;

pub use lookup::{LookupRow, PermissionGroup, TicketHolderType};
pub use record::{Booking, BookingId, Film, Ticket, TicketId, User, UserId};
