//! Domain errors

use meta_script::ScriptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validator {index} of action {action} failed to evaluate: {source}")]
    ValidatorEvaluation {
        action: String,
        index: usize,
        #[source]
        source: ScriptError,
    },

    #[error("Invalid resume token: {0}")]
    InvalidResumeToken(String),

    #[error("Resume token targets action {found}, expected {expected}")]
    ActionMismatch { expected: String, found: String },

    #[error("Resume index {index} out of range for action {action} ({len} validators)")]
    ResumeIndexOutOfRange {
        action: String,
        index: usize,
        len: usize,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Fixture error: {0}")]
    FixtureError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
