//! Repository trait for subdomain, category and language records.

use crate::domain::entities::{Lookup, LookupKind, NewLookup};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for lookup records of every [`LookupKind`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// Creates a record in the table for `new_lookup.kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_lookup: NewLookup) -> Result<Lookup, AppError>;

    /// Finds a record by kind and ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, kind: LookupKind, id: i64) -> Result<Option<Lookup>, AppError>;

    /// Lists records of one kind ordered by label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, kind: LookupKind, offset: i64, limit: i64)
    -> Result<Vec<Lookup>, AppError>;

    /// Counts records of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, kind: LookupKind) -> Result<i64, AppError>;

    /// Saves the label and updater fields of `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, lookup: Lookup) -> Result<Lookup, AppError>;

    /// Deletes a record. Domains referencing it drop the reference.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, kind: LookupKind, id: i64) -> Result<(), AppError>;
}
