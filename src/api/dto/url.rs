//! DTOs for URL endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::audit::AuditInfo;
use crate::domain::entities::UrlRecord;

/// Body of `POST /api/urls` and `PUT /api/urls/{id}`.
///
/// Only presence is checked here. Scheme, host form, reachability and
/// length are checked by the service so the errors carry their `kind`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UrlItem {
    pub id: i64,
    pub url: String,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<UrlRecord> for UrlItem {
    fn from(r: UrlRecord) -> Self {
        Self {
            id: r.id,
            url: r.url,
            audit: r.audit.into(),
        }
    }
}

/// A newly created URL and the sibling stored alongside it.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub url: UrlItem,
    pub sibling: UrlItem,
}
