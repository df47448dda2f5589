//! Teamdir core - member records and roster loading.
//!
//! This crate provides:
//! - `Member` and `MemberId`, with id slugs derived from names
//! - `Roster`, the normalised, id-unique member list
//! - `RosterLoader` implementations for embedded, file, and HTTP sources

pub mod error;
pub mod loader;
pub mod member;
pub mod roster;

pub use error::{LoadError, LoadResult};
pub use loader::{load_roster, EmbeddedRoster, FileRoster, HttpRoster, RosterLoader, RosterSource};
pub use member::{Member, MemberId, RawMember};
pub use roster::Roster;

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{LoadError, LoadResult};
    pub use crate::loader::{RosterLoader, RosterSource};
    pub use crate::member::{Member, MemberId};
    pub use crate::roster::Roster;
}
