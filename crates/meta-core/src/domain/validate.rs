// ============================================================================
// Meta Core - Validator Chain
// File: crates/meta-core/src/domain/validate.rs
// Description: Ordered error/alert/info/notify checks of a validate action
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::resume::ResumeToken;
use crate::error::DomainError;

pub const INFO_KEY: &str = "info";
pub const NOTIFY_KEY: &str = "notify";
pub const PENDING_KEY: &str = "pending";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    Error,
    Alert,
    Info,
    Notify,
}

impl ValidatorKind {
    /// Key of the validator output in the result map.
    pub fn key(self) -> &'static str {
        match self {
            ValidatorKind::Error => "error",
            ValidatorKind::Alert => "alert",
            ValidatorKind::Info => INFO_KEY,
            ValidatorKind::Notify => NOTIFY_KEY,
        }
    }

    /// Error and alert stop the evaluation pass.
    pub fn is_blocking(self) -> bool {
        matches!(self, ValidatorKind::Error | ValidatorKind::Alert)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Validator {
    pub kind: ValidatorKind,

    /// Message or translation key, may contain `${...}` placeholders
    pub message: String,

    /// Test expression; a blank test always matches
    #[serde(default, rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Follow-up action run by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Validator {
    pub fn new(kind: ValidatorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            condition: None,
            title: None,
            action: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self::new(ValidatorKind::Error, message)
    }

    pub fn alert(message: &str) -> Self {
        Self::new(ValidatorKind::Alert, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(ValidatorKind::Info, message)
    }

    pub fn notify(message: &str) -> Self {
        Self::new(ValidatorKind::Notify, message)
    }

    pub fn when(mut self, condition: &str) -> Self {
        self.condition = Some(condition.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    pub fn to_message(&self, message: String, title: Option<String>) -> ValidatorMessage {
        ValidatorMessage {
            message,
            title,
            action: self.action.clone(),
        }
    }
}

/// Resolved output of a matching validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValidatorMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A named, resumable chain of validators.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ActionValidate {
    #[validate(length(min = 1, max = 255, message = "Action name must be between 1 and 255 characters"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub validators: Vec<Validator>,
}

impl ActionValidate {
    pub fn new(name: &str, validators: Vec<Validator>) -> Result<Self, DomainError> {
        let action = Self {
            name: name.trim().to_string(),
            model: None,
            validators,
        };
        action.check()?;
        Ok(action)
    }

    /// Validate a definition, e.g. one deserialized from a file.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        if !ResumeToken::is_valid_action_name(&self.name) {
            return Err(DomainError::ValidationError(format!(
                "Action name cannot be used in a resume token: {}",
                self.name
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn token_at(&self, index: usize) -> ResumeToken {
        ResumeToken::new(&self.name, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keys() {
        assert_eq!(ValidatorKind::Error.key(), "error");
        assert_eq!(ValidatorKind::Alert.key(), "alert");
        assert!(ValidatorKind::Alert.is_blocking());
        assert!(!ValidatorKind::Notify.is_blocking());
    }

    #[test]
    fn test_deserialize_chain() {
        let json = r#"{
            "name": "action-validate-order",
            "validators": [
                {"kind": "alert", "message": "Large order", "if": "total > 1000"},
                {"kind": "error", "message": "No lines", "if": "empty(lines)", "action": "action-open-lines"}
            ]
        }"#;
        let action: ActionValidate = serde_json::from_str(json).unwrap();
        action.check().unwrap();

        assert_eq!(action.len(), 2);
        assert_eq!(action.validators[0].condition.as_deref(), Some("total > 1000"));
        assert_eq!(action.validators[1].action.as_deref(), Some("action-open-lines"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(ActionValidate::new("", vec![]).is_err());
        assert!(ActionValidate::new("bad[0]", vec![]).is_err());
        assert!(ActionValidate::new("action-ok", vec![]).is_ok());
    }

    #[test]
    fn test_message_keeps_action() {
        let validator = Validator::error("Missing").with_action("action-fix");
        let message = validator.to_message("Missing".into(), None);
        assert_eq!(message.action.as_deref(), Some("action-fix"));

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("title").is_none());
    }
}
