//! Condition and expression evaluation through [`Engine`]

use meta_core::ports::{ConditionEvaluator, ExpressionEvaluator};
use meta_script::{Bindings, Engine, ScriptError};
use serde_json::Value;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptEvaluator {
    engine: Engine,
}

impl ScriptEvaluator {
    pub fn new() -> Self {
        Self { engine: Engine::new() }
    }
}

impl ConditionEvaluator for ScriptEvaluator {
    fn evaluate_boolean(&self, expression: &str, bindings: &Bindings) -> Result<bool, ScriptError> {
        self.engine.evaluate_bool(expression, bindings)
    }
}

impl ExpressionEvaluator for ScriptEvaluator {
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<Value, ScriptError> {
        self.engine.evaluate(expression, bindings)
    }

    fn interpolate(&self, template: &str, bindings: &Bindings) -> Result<String, ScriptError> {
        self.engine.interpolate(template, bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bindings() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert("__user__".into(), json!({"code": "demo", "roles": ["sales"]}));
        bindings
    }

    #[test]
    fn test_condition() {
        let evaluator = ScriptEvaluator::new();
        assert!(evaluator
            .evaluate_boolean("'sales' in __user__.roles", &bindings())
            .unwrap());
        assert!(!evaluator
            .evaluate_boolean("__user__.code == 'admin'", &bindings())
            .unwrap());
        assert!(evaluator.evaluate_boolean("__missing__", &bindings()).is_err());
    }

    #[test]
    fn test_interpolate() {
        let evaluator = ScriptEvaluator::new();
        assert_eq!(
            evaluator.interpolate("Hello ${upper(__user__.code)}", &bindings()).unwrap(),
            "Hello DEMO"
        );
    }
}
