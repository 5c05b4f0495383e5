//! Labeled lookup records: subdomains, categories and languages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::audit::{AuditStamp, Audited};

/// The kind of lookup record. Each kind lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    #[serde(rename = "subdomains")]
    Subdomain,
    #[serde(rename = "categories")]
    Category,
    #[serde(rename = "languages")]
    Language,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [Self::Subdomain, Self::Category, Self::Language];

    /// Table holding records of this kind.
    pub fn table(self) -> &'static str {
        match self {
            Self::Subdomain => "subdomains",
            Self::Category => "categories",
            Self::Language => "languages",
        }
    }

    /// Column holding the label.
    pub fn column(self) -> &'static str {
        match self {
            Self::Subdomain => "subdomain",
            Self::Category => "category",
            Self::Language => "language",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A stored lookup record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub id: i64,
    pub kind: LookupKind,
    pub name: String,
    pub audit: AuditStamp,
}

impl Audited for Lookup {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}

/// Input data for creating a lookup record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLookup {
    pub kind: LookupKind,
    pub name: String,
    pub audit: AuditStamp,
}

impl Audited for NewLookup {
    fn audit(&self) -> &AuditStamp {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditStamp {
        &mut self.audit
    }
}
