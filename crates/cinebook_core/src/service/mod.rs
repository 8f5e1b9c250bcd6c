//! Access facade and read models.
//!
//! # Responsibility
//! - Expose the only boundary external callers (the menu layer) use.
//! - Keep raw repository access behind authentication-shaped entry points.
//!
//! # Invariants
//! - Read models never carry passwords.
//! - Anticipated conditions (bad credentials, taken username, unresolvable
//!   booking input) are typed outcome values, never errors.

mod access;

pub use access::{
    Access, AuthOutcome, BookingConfirmation, BookingOutcome, BookingSummary, RegisterOutcome,
    UserView,
};
