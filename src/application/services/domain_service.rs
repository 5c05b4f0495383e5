//! Domain management service.

use crate::domain::audit::{AuditStamp, Clock, stamp_on_save};
use crate::domain::entities::{Actor, Domain, DomainFilter, NewDomain, UpdateDomain};
use crate::domain::ownership::ensure_can_modify;
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Maximum length of a domain description.
pub const MAX_ABOUT_LENGTH: usize = 1000;

/// Input for creating a domain.
#[derive(Debug, Clone)]
pub struct DomainInput {
    pub about: String,
    pub url_id: Option<i64>,
    pub subdomain_id: Option<i64>,
    pub category_ids: Vec<i64>,
    pub language_ids: Vec<i64>,
}

/// Service for curated domain records.
///
/// Handles validation of descriptions and category/language sets, audit
/// stamping, and the ownership check on update and delete.
pub struct DomainService<R: DomainRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: DomainRepository> DomainService<R> {
    /// Creates a new domain service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Creates a domain owned by `actor`.
    ///
    /// # Validation
    ///
    /// - `about`: 1-1000 characters after trimming
    /// - At least one category and one language
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails or a referenced
    /// record does not exist.
    /// Returns [`AppError::Conflict`] if the URL already backs another domain.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_domain(&self, input: DomainInput, actor: &Actor) -> Result<Domain, AppError> {
        let about = validate_about(&input.about)?;
        let category_ids = validate_set("category_ids", input.category_ids)?;
        let language_ids = validate_set("language_ids", input.language_ids)?;

        let mut new_domain = NewDomain {
            about,
            url_id: input.url_id,
            subdomain_id: input.subdomain_id,
            category_ids,
            language_ids,
            audit: AuditStamp::default(),
        };
        stamp_on_save(&mut new_domain, actor, self.clock.now(), false);

        let created = self.repository.create(new_domain).await?;

        tracing::info!(domain_id = created.id, user_id = actor.user_id, "Domain created");
        Ok(created)
    }

    /// Retrieves a domain by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_domain(&self, id: i64) -> Result<Domain, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": id})))
    }

    /// Lists domains with the total count.
    ///
    /// With `mine`, only domains created by `actor` are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_domains(
        &self,
        actor: &Actor,
        mine: bool,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Domain>, i64), AppError> {
        let filter = DomainFilter {
            created_by: mine.then_some(actor.user_id),
            search: search.filter(|s| !s.trim().is_empty()),
        };

        let items = self.repository.list(filter.clone(), offset, limit).await?;
        let total = self.repository.count(filter).await?;

        Ok((items, total))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Forbidden`] if `actor` neither created it nor is a superuser.
    /// Returns [`AppError::Validation`] if a present field is invalid.
    /// Returns [`AppError::Conflict`] if the URL already backs another domain.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_domain(
        &self,
        id: i64,
        mut update: UpdateDomain,
        actor: &Actor,
    ) -> Result<Domain, AppError> {
        let mut domain = self.get_domain(id).await?;
        ensure_can_modify(actor, &domain, id)?;

        if let Some(about) = update.about.take() {
            update.about = Some(validate_about(&about)?);
        }
        if let Some(ids) = update.category_ids.take() {
            update.category_ids = Some(validate_set("category_ids", ids)?);
        }
        if let Some(ids) = update.language_ids.take() {
            update.language_ids = Some(validate_set("language_ids", ids)?);
        }

        update.apply_to(&mut domain);
        stamp_on_save(&mut domain, actor, self.clock.now(), true);

        let saved = self.repository.update(domain).await?;

        tracing::info!(domain_id = id, user_id = actor.user_id, "Domain updated");
        Ok(saved)
    }

    /// Deletes a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Forbidden`] if `actor` neither created it nor is a superuser.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_domain(&self, id: i64, actor: &Actor) -> Result<(), AppError> {
        let domain = self.get_domain(id).await?;
        ensure_can_modify(actor, &domain, id)?;

        self.repository.delete(id).await?;

        tracing::info!(domain_id = id, user_id = actor.user_id, "Domain deleted");
        Ok(())
    }
}

/// Trims and length-checks a description.
fn validate_about(about: &str) -> Result<String, AppError> {
    let about = about.trim();
    let len = about.chars().count();

    if len == 0 || len > MAX_ABOUT_LENGTH {
        return Err(AppError::bad_request(
            "Invalid description length",
            json!({"field": "about", "min": 1, "max": MAX_ABOUT_LENGTH}),
        ));
    }

    Ok(about.to_string())
}

/// Requires a non-empty id set; duplicates are dropped.
fn validate_set(field: &'static str, mut ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Err(AppError::bad_request(
            "Select at least one entry",
            json!({"field": field}),
        ));
    }

    Ok(ids)
}
