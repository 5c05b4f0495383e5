//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Curated records ([`UrlRecord`],
//! [`Domain`], [`Lookup`]) carry an [`crate::domain::audit::AuditStamp`] and
//! implement [`crate::domain::audit::Audited`].
//!
//! # Design Pattern
//!
//! Separate structs are used for creation and partial updates:
//! - `NewUrl`, `NewDomain`, `NewLookup`, `NewUser` - For creating new records
//! - `UpdateDomain` - For partial updates

pub mod domain;
pub mod lookup;
pub mod url;
pub mod user;

pub use domain::{Domain, DomainFilter, NewDomain, UpdateDomain};
pub use lookup::{Lookup, LookupKind, NewLookup};
pub use url::{NewUrl, UrlFilter, UrlRecord};
pub use user::{Actor, NewUser, User};
