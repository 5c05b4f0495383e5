//! URL creation and synchronized editing of bare / `www.` pairs.

use std::sync::Arc;

use crate::application::services::ReachabilityService;
use crate::domain::audit::{Clock, stamp_on_save};
use crate::domain::entities::{Actor, NewUrl, UrlFilter, UrlRecord};
use crate::domain::ownership::{ensure_can_modify, visible_owner};
use crate::domain::repositories::UrlRepository;
use crate::domain::url_pair::{UrlParts, check_syntax, pair_renames};
use crate::error::AppError;
use serde_json::json;

/// Maximum stored URL length, for the submitted value and its sibling alike.
pub const MAX_URL_LENGTH: usize = 200;

/// Service keeping every URL paired with its `www.` sibling.
///
/// Creating `https://example.com` also stores `https://www.example.com` and
/// the other way round. Editing one member of a pair renames both.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    reachability: Arc<ReachabilityService>,
    clock: Arc<dyn Clock>,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(
        repository: Arc<R>,
        reachability: Arc<ReachabilityService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            reachability,
            clock,
        }
    }

    /// Creates a URL and its sibling, both owned by `actor`.
    ///
    /// Returns `(primary, sibling)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute URL, does
    /// not fit `http(s)://[www.]host`, is too long or fails the reachability
    /// check. Shape errors are reported without sending a request.
    /// Returns [`AppError::Conflict`] if either value is already stored.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_url(
        &self,
        url: String,
        actor: &Actor,
    ) -> Result<(UrlRecord, UrlRecord), AppError> {
        check_syntax(&url)?;
        let sibling_url = UrlParts::parse(&url)?.sibling();
        check_length(&url)?;
        check_length(&sibling_url)?;

        self.reachability.validate(&url).await?;

        let now = self.clock.now();
        let mut primary = NewUrl::new(url);
        let mut sibling = NewUrl::new(sibling_url);
        stamp_on_save(&mut primary, actor, now, false);
        stamp_on_save(&mut sibling, actor, now, false);

        let (primary, sibling) = self.repository.create_pair(primary, sibling).await?;

        tracing::info!(
            url_id = primary.id,
            sibling_id = sibling.id,
            user_id = actor.user_id,
            "URL pair created"
        );

        Ok((primary, sibling))
    }

    /// Changes a URL to `new_url` and renames its sibling to match.
    ///
    /// Whether the pair is treated as bare or `www.` is decided by the stored
    /// value alone; `new_url` is split with the same rule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL does not exist.
    /// Returns [`AppError::Forbidden`] if `actor` neither created it nor is a superuser.
    /// Returns [`AppError::Validation`] if `new_url` does not fit the stored
    /// value's form or fails the reachability check; the probe only runs once
    /// the shape is accepted.
    /// Returns [`AppError::Conflict`] if a renamed value is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_url(
        &self,
        id: i64,
        new_url: String,
        actor: &Actor,
    ) -> Result<UrlRecord, AppError> {
        let record = self.find(id).await?;
        ensure_can_modify(actor, &record, id)?;

        check_syntax(&new_url)?;
        let [bare, www] = pair_renames(&record.url, &new_url)?;
        check_length(&www.to)?;

        self.reachability.validate(&new_url).await?;

        let mut updated = record;
        updated.url = new_url;
        stamp_on_save(&mut updated, actor, self.clock.now(), true);

        // The www key moves first so a bare value edited into a www one does
        // not collide with its own sibling.
        let saved = self
            .repository
            .update_with_siblings(updated, vec![www, bare])
            .await?;

        tracing::info!(url_id = saved.id, user_id = actor.user_id, "URL pair updated");

        Ok(saved)
    }

    /// Retrieves a URL visible to `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL does not exist or belongs to
    /// another user and `actor` is not a superuser.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_url(&self, id: i64, actor: &Actor) -> Result<UrlRecord, AppError> {
        let record = self.find(id).await?;

        match visible_owner(actor) {
            Some(owner) if record.audit.created_by != Some(owner) => {
                Err(AppError::not_found("URL not found", json!({"id": id})))
            }
            _ => Ok(record),
        }
    }

    /// Lists URLs visible to `actor`, with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_urls(
        &self,
        actor: &Actor,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<UrlRecord>, i64), AppError> {
        let filter = UrlFilter {
            created_by: visible_owner(actor),
            search: search.filter(|s| !s.trim().is_empty()),
        };

        let items = self.repository.list(filter.clone(), offset, limit).await?;
        let total = self.repository.count(filter).await?;

        Ok((items, total))
    }

    /// Deletes a URL. Its sibling is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the URL does not exist.
    /// Returns [`AppError::Forbidden`] if `actor` neither created it nor is a superuser.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_url(&self, id: i64, actor: &Actor) -> Result<(), AppError> {
        let record = self.find(id).await?;
        ensure_can_modify(actor, &record, id)?;

        self.repository.delete(id).await?;

        tracing::info!(url_id = id, user_id = actor.user_id, "URL deleted");
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({"id": id})))
    }
}

fn check_length(url: &str) -> Result<(), AppError> {
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            format!("URL must be at most {MAX_URL_LENGTH} characters, including the www. prefix"),
            json!({"kind": "url_too_long", "url": url, "max": MAX_URL_LENGTH}),
        ));
    }
    Ok(())
}
