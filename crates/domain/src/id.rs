//! ID generation and validation.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generates a new request id.
///
/// UUID v7 includes timestamp information, so ids sort roughly by creation.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Returns the reason `value` cannot be used as a single path component.
fn path_component_problem(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("must not be empty")
    } else if value.contains(['/', '\\', '\0']) {
        Some("must not contain path separators")
    } else if value.starts_with('.') {
        Some("must not start with '.'")
    } else {
        None
    }
}

/// Checks that a request id can name a record file.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` for empty ids, ids containing
/// path separators and ids starting with a dot.
pub fn validate_id(id: &str) -> DomainResult<()> {
    match path_component_problem(id) {
        Some(reason) => Err(DomainError::InvalidIdentifier(format!("{id:?} {reason}"))),
        None => Ok(()),
    }
}

/// Checks that a collection name can name a directory.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` under the same rules as [`validate_id`].
pub fn validate_collection_name(name: &str) -> DomainResult<()> {
    match path_component_problem(name) {
        Some(reason) => Err(DomainError::InvalidName(format!("{name:?} {reason}"))),
        None => Ok(()),
    }
}
