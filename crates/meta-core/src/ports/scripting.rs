//! Scripting traits (ports)

use meta_script::{Bindings, ScriptError};
use serde_json::Value;

/// Boolean conditions attached to menus.
#[cfg_attr(test, mockall::automock)]
pub trait ConditionEvaluator: Send + Sync {
    fn evaluate_boolean(&self, expression: &str, bindings: &Bindings) -> Result<bool, ScriptError>;
}

/// Expressions and message templates of validators.
#[cfg_attr(test, mockall::automock)]
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<Value, ScriptError>;

    /// Substitute `${...}` placeholders of a message.
    fn interpolate(&self, template: &str, bindings: &Bindings) -> Result<String, ScriptError>;
}
