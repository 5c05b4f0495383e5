//! Creator-only mutation rule with a superuser override.

use serde_json::json;

use crate::domain::audit::Audited;
use crate::domain::entities::Actor;
use crate::error::AppError;

/// Message shown when a user edits a record they do not own.
pub const NOT_OWNER_MESSAGE: &str = "Selected domain does not belong to you!";

/// Allows the change only if `actor` created `record` or is a superuser.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] with `details.kind = "not_owner"` otherwise.
pub fn ensure_can_modify<T: Audited>(actor: &Actor, record: &T, record_id: i64) -> Result<(), AppError> {
    if actor.is_superuser || record.is_created_by(actor.user_id) {
        return Ok(());
    }

    tracing::warn!(
        user_id = actor.user_id,
        record_id,
        owner = ?record.audit().created_by,
        "Rejected change to a record owned by another user"
    );

    Err(AppError::forbidden(
        NOT_OWNER_MESSAGE,
        json!({ "kind": "not_owner", "id": record_id }),
    ))
}

/// Owner filter for list queries: `None` lets superusers see every record.
pub fn visible_owner(actor: &Actor) -> Option<i64> {
    if actor.is_superuser {
        None
    } else {
        Some(actor.user_id)
    }
}
