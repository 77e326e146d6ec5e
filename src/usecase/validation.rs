//! Input validation shared by the use cases.

use tracing::debug;

use crate::db::{DbError, DbResult, Id};

/// Reject IDs that can never name a row.
pub fn require_id(entity_type: &str, id: Id) -> DbResult<()> {
    if id <= 0 {
        debug!(entity_type, id, "Rejected non-positive id");
        return Err(DbError::validation(format!(
            "{} id must be a positive integer, got {}",
            entity_type, id
        )));
    }
    Ok(())
}

/// Trim a required text field, rejecting blank values.
pub fn require_text(field: &str, value: &str) -> DbResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DbError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Light sanity check on an optional email address.
pub fn optional_email(value: Option<String>) -> DbResult<Option<String>> {
    match optional_text(value) {
        Some(email) if !email.contains('@') => Err(DbError::validation(format!(
            "email '{}' is not a valid address",
            email
        ))),
        other => Ok(other),
    }
}
