//! Audit fields shared by every curated record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::audit::AuditStamp;

#[derive(Debug, Serialize)]
pub struct AuditInfo {
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AuditStamp> for AuditInfo {
    fn from(a: AuditStamp) -> Self {
        Self {
            created_by: a.created_by,
            created_at: a.created_at,
            updated_by: a.updated_by,
            updated_at: a.updated_at,
        }
    }
}
