//! Domain entity: a curated website described by its URL, categories and languages.

use crate::domain::audit::{AuditStamp, Audited};

/// A curated website.
///
/// `url_id` points at one URL record (one-to-one) and is cleared when that
/// URL is deleted. `url` is the joined URL string, when linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: i64,
    pub about: String,
    pub url_id: Option<i64>,
    pub url: Option<String>,
    pub subdomain_id: Option<i64>,
    pub category_ids: Vec<i64>,
    pub language_ids: Vec<i64>,
    pub audit: AuditStamp,
}

impl Audited for Domain {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Input data for creating a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDomain {
    pub about: String,
    pub url_id: Option<i64>,
    pub subdomain_id: Option<i64>,
    pub category_ids: Vec<i64>,
    pub language_ids: Vec<i64>,
    pub audit: AuditStamp,
}

impl Audited for NewDomain {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Partial update for a domain.
///
/// `None` fields are left unchanged. For `url_id` and `subdomain_id`,
/// `Some(None)` clears the link and `Some(Some(id))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDomain {
    pub about: Option<String>,
    pub url_id: Option<Option<i64>>,
    pub subdomain_id: Option<Option<i64>>,
    pub category_ids: Option<Vec<i64>>,
    pub language_ids: Option<Vec<i64>>,
}

impl UpdateDomain {
    /// Applies the present fields onto `domain`.
    pub fn apply_to(self, domain: &mut Domain) {
        if let Some(about) = self.about {
            domain.about = about;
        }
        if let Some(url_id) = self.url_id {
            domain.url_id = url_id;
        }
        if let Some(subdomain_id) = self.subdomain_id {
            domain.subdomain_id = subdomain_id;
        }
        if let Some(category_ids) = self.category_ids {
            domain.category_ids = category_ids;
        }
        if let Some(language_ids) = self.language_ids {
            domain.language_ids = language_ids;
        }
    }
}

/// Filter for domain listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFilter {
    pub created_by: Option<i64>,
    /// Case-insensitive substring of the linked URL.
    pub search: Option<String>,
}
