//! Fixed enumerations backing the two lookup tables.
//!
//! Both tables hold a known, finite row set decided ahead of time. The
//! enums below are the source of truth; the seed routine reconciles the
//! tables against them via upsert (names may be corrected in place, rows
//! are never deleted in normal operation).

/// One row of a lookup table as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRow {
    pub id: i64,
    pub readable: String,
}

/// Groups that determine what a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionGroup {
    Admin,
    Developer,
}

impl PermissionGroup {
    /// Every member, in id order. Reconciliation iterates this list.
    pub const ALL: [Self; 2] = [Self::Admin, Self::Developer];

    /// Stable small-integer id used as the table's primary key.
    pub fn id(self) -> i64 {
        match self {
            Self::Admin => 0,
            Self::Developer => 1,
        }
    }

    /// Readable name stored in the table's unique `readable` column.
    pub fn readable(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Developer => "DEVELOPER",
        }
    }
}

/// Ticket categories that would determine pricing in a fuller system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketHolderType {
    Adult,
    Teenager,
    Child,
    Student,
}

impl TicketHolderType {
    /// Every member, in id order. Reconciliation iterates this list.
    pub const ALL: [Self; 4] = [Self::Adult, Self::Teenager, Self::Child, Self::Student];

    /// Stable small-integer id used as the table's primary key.
    pub fn id(self) -> i64 {
        match self {
            Self::Adult => 0,
            Self::Teenager => 1,
            Self::Child => 2,
            Self::Student => 3,
        }
    }

    /// Readable name stored in the table's unique `readable` column.
    pub fn readable(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Teenager => "TEENAGER",
            Self::Child => "CHILD",
            Self::Student => "STUDENT",
        }
    }
}
