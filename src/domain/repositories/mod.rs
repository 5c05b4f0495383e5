//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - URL pairs keyed by exact value
//! - [`DomainRepository`] - Domain records with category and language sets
//! - [`LookupRepository`] - Subdomains, categories and languages
//! - [`UserRepository`] - User accounts
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod domain_repository;
pub mod lookup_repository;
pub mod token_repository;
pub mod url_repository;
pub mod user_repository;

pub use domain_repository::DomainRepository;
pub use lookup_repository::LookupRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use lookup_repository::MockLookupRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
