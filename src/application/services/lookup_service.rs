//! Subdomain, category and language management.

use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};

use crate::domain::audit::{AuditStamp, Clock, stamp_on_save};
use crate::domain::entities::{Actor, Lookup, LookupKind, NewLookup};
use crate::domain::repositories::LookupRepository;
use crate::error::AppError;

/// Maximum label length for every lookup kind.
pub const MAX_LABEL_LENGTH: usize = 200;

/// One or more comma-separated paths such as `home` or `home/gallery`,
/// without leading or trailing slashes.
static SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/,\s]+(/[^/,\s]+)*(\s*,\s*[^/,\s]+(/[^/,\s]+)*)*$").unwrap()
});

/// Service for the labeled lookup records referenced by domains.
///
/// Lookups have no ownership check: any authenticated user may edit them.
pub struct LookupService<R: LookupRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: LookupRepository> LookupService<R> {
    /// Creates a new lookup service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Creates a record of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the label is invalid.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(
        &self,
        kind: LookupKind,
        name: &str,
        actor: &Actor,
    ) -> Result<Lookup, AppError> {
        let mut new_lookup = NewLookup {
            kind,
            name: normalize_label(kind, name)?,
            audit: AuditStamp::default(),
        };
        stamp_on_save(&mut new_lookup, actor, self.clock.now(), false);

        let created = self.repository.create(new_lookup).await?;

        tracing::info!(%kind, id = created.id, user_id = actor.user_id, "Lookup created");
        Ok(created)
    }

    /// Retrieves a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get(&self, kind: LookupKind, id: i64) -> Result<Lookup, AppError> {
        self.repository.find_by_id(kind, id).await?.ok_or_else(|| {
            AppError::not_found(
                format!("{} not found", capitalize(kind.column())),
                json!({"kind": kind.table(), "id": id}),
            )
        })
    }

    /// Lists records of `kind` with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(
        &self,
        kind: LookupKind,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Lookup>, i64), AppError> {
        let items = self.repository.list(kind, offset, limit).await?;
        let total = self.repository.count(kind).await?;
        Ok((items, total))
    }

    /// Renames a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Validation`] if the label is invalid.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(
        &self,
        kind: LookupKind,
        id: i64,
        name: &str,
        actor: &Actor,
    ) -> Result<Lookup, AppError> {
        let name = normalize_label(kind, name)?;
        let mut lookup = self.get(kind, id).await?;

        lookup.name = name;
        stamp_on_save(&mut lookup, actor, self.clock.now(), true);

        self.repository.update(lookup).await
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, kind: LookupKind, id: i64) -> Result<(), AppError> {
        self.repository.delete(kind, id).await?;
        tracing::info!(%kind, id, "Lookup deleted");
        Ok(())
    }
}

/// Trims a label and checks it against the rules for `kind`.
fn normalize_label(kind: LookupKind, name: &str) -> Result<String, AppError> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 || len > MAX_LABEL_LENGTH {
        return Err(AppError::bad_request(
            "Invalid label length",
            json!({"field": kind.column(), "min": 1, "max": MAX_LABEL_LENGTH}),
        ));
    }

    if kind == LookupKind::Subdomain && !SUBDOMAIN_REGEX.is_match(name) {
        return Err(AppError::bad_request(
            "Enter subdomains without leading or trailing slashes, separated by commas, e.g. home,home/gallery",
            json!({"field": "subdomain", "value": name}),
        ));
    }

    Ok(name.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::SystemClock;
    use crate::domain::repositories::MockLookupRepository;

    fn actor() -> Actor {
        Actor::new(4, "staff@ada.edu.az".to_string(), false)
    }

    fn service(repo: MockLookupRepository) -> LookupService<MockLookupRepository> {
        LookupService::new(Arc::new(repo), Arc::new(SystemClock))
    }

    fn echo_create(repo: &mut MockLookupRepository) {
        repo.expect_create().returning(|n| {
            Ok(Lookup {
                id: 1,
                kind: n.kind,
                name: n.name,
                audit: n.audit,
            })
        });
    }

    #[test]
    fn test_subdomain_labels() {
        for ok in ["home", "home/gallery", "home/gallery/amsterdam", "home,home/gallery", "a, b/c"] {
            assert!(normalize_label(LookupKind::Subdomain, ok).is_ok(), "{ok}");
        }
        for bad in ["/home", "home/", "home//gallery", "home,", ",home", "ho me"] {
            assert!(normalize_label(LookupKind::Subdomain, bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_category_labels_are_free_text() {
        assert_eq!(
            normalize_label(LookupKind::Category, "  News / Media ").unwrap(),
            "News / Media"
        );
        assert!(normalize_label(LookupKind::Category, "   ").is_err());
        assert!(normalize_label(LookupKind::Language, &"x".repeat(201)).is_err());
        assert!(normalize_label(LookupKind::Language, &"x".repeat(200)).is_ok());
    }

    #[tokio::test]
    async fn test_create_stamps_creator() {
        let mut repo = MockLookupRepository::new();
        echo_create(&mut repo);

        let created = service(repo)
            .create(LookupKind::Language, " Azerbaijani ", &actor())
            .await
            .unwrap();

        assert_eq!(created.name, "Azerbaijani");
        assert_eq!(created.kind, LookupKind::Language);
        assert_eq!(created.audit.created_by, Some(4));
    }

    #[tokio::test]
    async fn test_create_invalid_subdomain_writes_nothing() {
        let mut repo = MockLookupRepository::new();
        repo.expect_create().times(0);

        let result = service(repo)
            .create(LookupKind::Subdomain, "/home/", &actor())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_names_kind() {
        let mut repo = MockLookupRepository::new();
        repo.expect_find_by_id().returning(|_, _| Ok(None));

        let err = service(repo).get(LookupKind::Category, 3).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Category not found");
    }

    #[tokio::test]
    async fn test_update_keeps_creator() {
        let mut repo = MockLookupRepository::new();
        repo.expect_find_by_id().returning(|kind, id| {
            Ok(Some(Lookup {
                id,
                kind,
                name: "Old".to_string(),
                audit: AuditStamp {
                    created_by: Some(1),
                    ..Default::default()
                },
            }))
        });
        repo.expect_update().times(1).returning(|l| Ok(l));

        let saved = service(repo)
            .update(LookupKind::Category, 3, "Education", &actor())
            .await
            .unwrap();

        assert_eq!(saved.name, "Education");
        assert_eq!(saved.audit.created_by, Some(1));
        assert_eq!(saved.audit.updated_by, Some(4));
    }
}
