//! Core data-access layer for the cinema booking records store.
//! This crate is the single source of truth for schema, transactional
//! repository operations, and the access/auth facade the menu layer uses.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::{
    Booking, BookingId, Film, LookupRow, PermissionGroup, Ticket, TicketHolderType, TicketId,
    User, UserId,
};
pub use repo::booking_repo::TICKET_PRICE_PENCE;
pub use repo::{RepoError, RepoResult};
pub use service::{
    Access, AuthOutcome, BookingConfirmation, BookingOutcome, BookingSummary, RegisterOutcome,
    UserView,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
