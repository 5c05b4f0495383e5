//! Repository trait for domain records.

use crate::domain::entities::{Domain, DomainFilter, NewDomain};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing domains.
///
/// A domain owns its category and language sets; both are replaced wholesale
/// on update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_domain.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Creates a new domain with its category and language sets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the URL already backs another domain.
    /// Returns [`AppError::Validation`] if a referenced record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError>;

    /// Finds a domain by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError>;

    /// Lists domains ordered by their linked URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        filter: DomainFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Domain>, AppError>;

    /// Counts domains matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: DomainFilter) -> Result<i64, AppError>;

    /// Saves every column of `domain`, including both sets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Conflict`] if the URL already backs another domain.
    /// Returns [`AppError::Validation`] if a referenced record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, domain: Domain) -> Result<Domain, AppError>;

    /// Deletes a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
