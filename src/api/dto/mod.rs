//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod audit;
pub mod auth;
pub mod domain;
pub mod health;
pub mod lookup;
pub mod pagination;
pub mod url;
