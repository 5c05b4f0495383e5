//! DTOs for subdomain, category and language endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::audit::AuditInfo;
use crate::domain::entities::{Lookup, LookupKind};

/// Body of `POST /api/lookups/{kind}` and `PUT /api/lookups/{kind}/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct LookupRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LookupItem {
    pub id: i64,
    pub kind: LookupKind,
    pub name: String,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Lookup> for LookupItem {
    fn from(l: Lookup) -> Self {
        Self {
            id: l.id,
            kind: l.kind,
            name: l.name,
            audit: l.audit.into(),
        }
    }
}
