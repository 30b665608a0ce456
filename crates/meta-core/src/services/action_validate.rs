// ============================================================================
// Meta Core - Validator Chain Evaluator
// File: crates/meta-core/src/services/action_validate.rs
// ============================================================================
//! Resumable evaluation of a validate action.
//!
//! A pass walks the validators from a cursor. Info keeps the first match,
//! notify accumulates, and the first matching error or alert ends the pass.
//! An alert with validators left after it yields a [`ResumeToken`] so the
//! client can continue past it once the user acknowledged the alert.

use meta_script::{is_truthy, Bindings, ScriptError};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::validate::{INFO_KEY, NOTIFY_KEY, PENDING_KEY};
use crate::domain::{ActionValidate, ResumeToken, Validator, ValidatorKind, ValidatorMessage};
use crate::error::DomainError;
use crate::ports::{ExpressionEvaluator, MessageResolver};

/// Evaluation context of an action: record values plus translation and scripting.
pub struct ActionHandler<'a> {
    context: Bindings,
    messages: &'a dyn MessageResolver,
    expressions: &'a dyn ExpressionEvaluator,
}

impl<'a> ActionHandler<'a> {
    pub fn new(
        context: Bindings,
        messages: &'a dyn MessageResolver,
        expressions: &'a dyn ExpressionEvaluator,
    ) -> Self {
        Self {
            context,
            messages,
            expressions,
        }
    }

    pub fn context(&self) -> &Bindings {
        &self.context
    }

    /// Blank tests pass, literal `true`/`false` skip evaluation.
    pub fn test(&self, condition: Option<&str>) -> Result<bool, ScriptError> {
        let condition = condition.map(str::trim).unwrap_or_default();
        match condition {
            "" | "true" => Ok(true),
            "false" => Ok(false),
            expression => self
                .expressions
                .evaluate(expression, &self.context)
                .map(|value| is_truthy(&value)),
        }
    }

    /// Translate a message key, then fill its `${...}` placeholders.
    pub fn resolve_message(&self, template: &str) -> Result<String, ScriptError> {
        let translated = self.messages.get(template);
        if translated.trim().is_empty() {
            return Ok(translated);
        }
        self.expressions.interpolate(&translated, &self.context)
    }

    pub fn translate(&self, key: &str) -> String {
        self.messages.get(key)
    }
}

/// Where a pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainState {
    /// Walked to the end without a blocking match
    Completed,
    /// Alert matched, evaluation may continue from the token
    Suspended { resume_at: ResumeToken },
    /// Error matched, or an alert with nothing after it
    Stopped { at: usize },
}

/// Result of one pass over a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub state: ChainState,
    pub blocking: Option<(ValidatorKind, ValidatorMessage)>,
    pub info: Option<ValidatorMessage>,
    pub notify: Vec<ValidatorMessage>,
}

impl ValidationOutcome {
    fn new() -> Self {
        Self {
            state: ChainState::Completed,
            blocking: None,
            info: None,
            notify: Vec::new(),
        }
    }

    pub fn pending(&self) -> Option<&ResumeToken> {
        match &self.state {
            ChainState::Suspended { resume_at } => Some(resume_at),
            _ => None,
        }
    }

    /// Index the next pass should start from, `None` once the chain is done.
    pub fn next_cursor(&self) -> Option<usize> {
        self.pending().map(|token| token.index)
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking.is_some()
    }

    /// Keyed map sent to the client.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        if let Some((kind, message)) = &self.blocking {
            map.insert(kind.key().to_string(), message_value(message));
        }
        if let Some(info) = &self.info {
            map.insert(INFO_KEY.to_string(), message_value(info));
        }
        if !self.notify.is_empty() {
            let notify = self.notify.iter().map(message_value).collect();
            map.insert(NOTIFY_KEY.to_string(), Value::Array(notify));
        }
        if let Some(token) = self.pending() {
            map.insert(PENDING_KEY.to_string(), Value::String(token.to_string()));
        }

        map
    }
}

fn message_value(message: &ValidatorMessage) -> Value {
    serde_json::to_value(message).unwrap_or(Value::Null)
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// One pass over `chain` starting at `resume_index`.
///
/// `Ok(None)` means nothing matched. A test or message that fails to
/// evaluate aborts the pass with [`DomainError::ValidatorEvaluation`].
pub fn evaluate(
    chain: &ActionValidate,
    resume_index: usize,
    handler: &ActionHandler<'_>,
) -> Result<Option<ValidationOutcome>, DomainError> {
    let len = chain.len();
    if resume_index > len {
        return Err(DomainError::ResumeIndexOutOfRange {
            action: chain.name.clone(),
            index: resume_index,
            len,
        });
    }

    let mut outcome = ValidationOutcome::new();

    for (index, validator) in chain.validators.iter().enumerate().skip(resume_index) {
        let failed = |source| DomainError::ValidatorEvaluation {
            action: chain.name.clone(),
            index,
            source,
        };

        if !handler.test(validator.condition.as_deref()).map_err(failed)? {
            continue;
        }

        match validator.kind {
            ValidatorKind::Info => {
                let message = resolve(validator, handler).map_err(failed)?;
                outcome.info.get_or_insert(message);
            }
            ValidatorKind::Notify => {
                outcome.notify.push(resolve(validator, handler).map_err(failed)?);
            }
            ValidatorKind::Error | ValidatorKind::Alert => {
                let message = resolve(validator, handler).map_err(failed)?;
                outcome.state = if validator.kind == ValidatorKind::Alert && index + 1 < len {
                    ChainState::Suspended {
                        resume_at: chain.token_at(index + 1),
                    }
                } else {
                    ChainState::Stopped { at: index }
                };
                outcome.blocking = Some((validator.kind, message));

                debug!(
                    "Action {} stopped at validator {} ({})",
                    chain.name,
                    index,
                    validator.key()
                );
                return Ok(Some(outcome));
            }
        }
    }

    if outcome.info.is_none() && outcome.notify.is_empty() {
        return Ok(None);
    }
    Ok(Some(outcome))
}

/// Continue a chain from a token produced by an earlier pass.
pub fn resume(
    chain: &ActionValidate,
    token: &ResumeToken,
    handler: &ActionHandler<'_>,
) -> Result<Option<ValidationOutcome>, DomainError> {
    if token.action != chain.name {
        return Err(DomainError::ActionMismatch {
            expected: chain.name.clone(),
            found: token.action.clone(),
        });
    }
    evaluate(chain, token.index, handler)
}

fn resolve(validator: &Validator, handler: &ActionHandler<'_>) -> Result<ValidatorMessage, ScriptError> {
    let message = handler.resolve_message(&validator.message)?;
    let title = validator.title.as_deref().map(|t| handler.translate(t));
    Ok(validator.to_message(message, title))
}
