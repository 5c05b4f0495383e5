//! Repository trait for URL records.

use crate::domain::entities::{NewUrl, UrlFilter, UrlRecord};
use crate::domain::url_pair::SiblingRename;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records and their `www.` siblings.
///
/// URLs are keyed by their exact string value; sibling lookups never
/// normalize.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a URL and its sibling atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if either value already exists; nothing
    /// is written in that case.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_pair(
        &self,
        primary: NewUrl,
        sibling: NewUrl,
    ) -> Result<(UrlRecord, UrlRecord), AppError>;

    /// Finds a URL by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a URL by exact string match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Lists URLs ordered by value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        filter: UrlFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UrlRecord>, AppError>;

    /// Counts URLs matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: UrlFilter) -> Result<i64, AppError>;

    /// Applies sibling renames and saves `record`, in one transaction.
    ///
    /// Each rename moves the row whose url equals `from` to `to` and stamps
    /// it with `record`'s updater fields. A rename that matches no row is
    /// skipped. Renames run in the given order, then `record` is written by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `record` no longer exists.
    /// Returns [`AppError::Conflict`] if a rename collides with another URL.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_with_siblings(
        &self,
        record: UrlRecord,
        renames: Vec<SiblingRename>,
    ) -> Result<UrlRecord, AppError>;

    /// Deletes a URL. Domains linked to it lose their link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
