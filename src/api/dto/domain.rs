//! DTOs for domain management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::audit::AuditInfo;
use crate::application::services::DomainInput;
use crate::domain::entities::{Domain, UpdateDomain};

/// Body of `POST /api/domains`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDomainRequest {
    #[validate(length(min = 1, max = 1000))]
    pub about: String,

    pub url_id: Option<i64>,

    pub subdomain_id: Option<i64>,

    #[validate(length(min = 1, message = "Select at least one category"))]
    pub category_ids: Vec<i64>,

    #[validate(length(min = 1, message = "Select at least one language"))]
    pub language_ids: Vec<i64>,
}

impl From<CreateDomainRequest> for DomainInput {
    fn from(r: CreateDomainRequest) -> Self {
        Self {
            about: r.about,
            url_id: r.url_id,
            subdomain_id: r.subdomain_id,
            category_ids: r.category_ids,
            language_ids: r.language_ids,
        }
    }
}

/// Body of `PATCH /api/domains/{id}`.
///
/// All fields are optional; only provided fields are changed.
/// `url_id: null` and `subdomain_id: null` clear the link.
#[derive(Debug, Deserialize)]
pub struct UpdateDomainRequest {
    pub about: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub url_id: Option<Option<i64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub subdomain_id: Option<Option<i64>>,

    pub category_ids: Option<Vec<i64>>,

    pub language_ids: Option<Vec<i64>>,
}

impl From<UpdateDomainRequest> for UpdateDomain {
    fn from(r: UpdateDomainRequest) -> Self {
        Self {
            about: r.about,
            url_id: r.url_id,
            subdomain_id: r.subdomain_id,
            category_ids: r.category_ids,
            language_ids: r.language_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DomainItem {
    pub id: i64,
    pub about: String,
    pub url_id: Option<i64>,
    pub url: Option<String>,
    pub subdomain_id: Option<i64>,
    pub category_ids: Vec<i64>,
    pub language_ids: Vec<i64>,
    #[serde(flatten)]
    pub audit: AuditInfo,
}

impl From<Domain> for DomainItem {
    fn from(d: Domain) -> Self {
        Self {
            id: d.id,
            about: d.about,
            url_id: d.url_id,
            url: d.url,
            subdomain_id: d.subdomain_id,
            category_ids: d.category_ids,
            language_ids: d.language_ids,
            audit: d.audit.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let cleared: UpdateDomainRequest =
            serde_json::from_str(r#"{"url_id": null}"#).unwrap();
        assert_eq!(cleared.url_id, Some(None));
        assert_eq!(cleared.subdomain_id, None);

        let set: UpdateDomainRequest = serde_json::from_str(r#"{"subdomain_id": 7}"#).unwrap();
        assert_eq!(set.subdomain_id, Some(Some(7)));
        assert_eq!(set.url_id, None);
    }

    #[test]
    fn test_create_requires_sets() {
        let req = CreateDomainRequest {
            about: "A news portal".to_string(),
            url_id: None,
            subdomain_id: None,
            category_ids: vec![],
            language_ids: vec![1],
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_ids"));
    }
}
