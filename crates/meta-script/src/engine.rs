use serde_json::Value;
use tracing::trace;

use crate::ast::Expr;
use crate::error::ScriptError;
use crate::eval::evaluate;
use crate::parser::parse;
use crate::template::interpolate;
use crate::value::is_truthy;
use crate::Bindings;

/// Prefix accepted (and ignored) in front of stored expressions.
const EVAL_PREFIX: &str = "eval:";

/// Stateless facade over the parser and evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, src: &str) -> Result<Expr, ScriptError> {
        parse(strip_prefix(src))
    }

    pub fn evaluate(&self, src: &str, bindings: &Bindings) -> Result<Value, ScriptError> {
        let expr = self.parse(src)?;
        let value = evaluate(&expr, bindings)?;
        trace!("Evaluated '{}' => {}", src, value);
        Ok(value)
    }

    /// Evaluate and coerce the result with [`is_truthy`].
    pub fn evaluate_bool(&self, src: &str, bindings: &Bindings) -> Result<bool, ScriptError> {
        self.evaluate(src, bindings).map(|v| is_truthy(&v))
    }

    pub fn interpolate(&self, template: &str, bindings: &Bindings) -> Result<String, ScriptError> {
        interpolate(template, bindings)
    }
}

fn strip_prefix(src: &str) -> &str {
    let trimmed = src.trim_start();
    trimmed.strip_prefix(EVAL_PREFIX).unwrap_or(trimmed)
}
