//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`InvHubError`]
//! via `#[from]`.

use crate::schedule::ScheduleError;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum InvHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated by user input.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be blank")]
    EmptyName,

    #[error("quantity must not be negative")]
    NegativeQuantity,

    #[error("item is out of stock")]
    OutOfStock,

    #[error("malformed identifier: {0}")]
    MalformedId(String),

    #[error(transparent)]
    ClockTime(#[from] ScheduleError),
}

/// No record of the given kind exists with the given id.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Item",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Item abc not found");
    }

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: InvHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            InvHubError::Validation(ValidationError::EmptyName)
        ));
    }
}
