//! URL record entity.

use crate::domain::audit::{AuditStamp, Audited};

/// A stored URL. Each one has a sibling differing only by the `www.` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub audit: AuditStamp,
}

impl UrlRecord {
    pub fn new(id: i64, url: String, audit: AuditStamp) -> Self {
        Self { id, url, audit }
    }
}

impl Audited for UrlRecord {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Input data for inserting a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub url: String,
    pub audit: AuditStamp,
}

impl NewUrl {
    /// Creates an unstamped insert; stamp it with [`crate::domain::audit::stamp_on_save`].
    pub fn new(url: String) -> Self {
        Self {
            url,
            audit: AuditStamp::default(),
        }
    }
}

impl Audited for NewUrl {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Filter for URL listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilter {
    /// Only URLs created by this user; `None` lists everyone's.
    pub created_by: Option<i64>,
    /// Case-insensitive substring of the URL.
    pub search: Option<String>,
}
