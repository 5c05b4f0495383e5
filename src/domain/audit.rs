//! Creator/updater stamping shared by every curated record.

use chrono::{DateTime, Utc};

use crate::domain::entities::Actor;

/// Audit columns carried by every curated record.
///
/// `created_by` is `None` once the creating user has been deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditStamp {
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Records that carry an [`AuditStamp`].
pub trait Audited {
    fn audit(&self) -> &AuditStamp;
    fn audit_mut(&mut self) -> &mut AuditStamp;

    /// Returns true if `user_id` created this record.
    fn is_created_by(&self, user_id: i64) -> bool {
        self.audit().created_by == Some(user_id)
    }
}

/// Stamps a record on save.
///
/// A first save (`change == false`) sets the creator fields; every save sets
/// the updater fields. Creator fields are left untouched on later saves.
pub fn stamp_on_save<T: Audited>(record: &mut T, actor: &Actor, now: DateTime<Utc>, change: bool) {
    let audit = record.audit_mut();
    if !change {
        audit.created_by = Some(actor.user_id);
        audit.created_at = now;
    }
    audit.updated_by = Some(actor.user_id);
    audit.updated_at = Some(now);
}

/// Source of the current time for audit stamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
