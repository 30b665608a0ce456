// ============================================================================
// Meta Infrastructure - Tag Resolver
// File: crates/meta-infrastructure/src/scripting/tag_resolver.rs
// ============================================================================
//! Menu tags from `tagGet` expressions or record counts

use std::collections::HashMap;
use std::sync::Arc;

use meta_core::domain::{MenuRecord, TagValue};
use meta_core::ports::TagResolver;
use meta_script::{display, Bindings, Engine};
use serde_json::Value;
use tracing::warn;

/// Number of records of a model, for menus with `tagCount`.
pub trait RecordCounter: Send + Sync {
    fn count(&self, model: &str) -> Option<i64>;
}

/// Counts known up front, e.g. loaded with a fixture.
#[derive(Debug, Default, Clone)]
pub struct StaticRecordCounter {
    counts: HashMap<String, i64>,
}

impl StaticRecordCounter {
    pub fn new(counts: HashMap<String, i64>) -> Self {
        Self { counts }
    }
}

impl RecordCounter for StaticRecordCounter {
    fn count(&self, model: &str) -> Option<i64> {
        self.counts.get(model).copied()
    }
}

pub struct ScriptTagResolver {
    engine: Engine,
    counter: Arc<dyn RecordCounter>,
    bindings: Bindings,
}

impl ScriptTagResolver {
    pub fn new(counter: Arc<dyn RecordCounter>) -> Self {
        Self {
            engine: Engine::new(),
            counter,
            bindings: Bindings::new(),
        }
    }

    /// Values visible to `tagGet` expressions.
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }
}

impl TagResolver for ScriptTagResolver {
    fn resolve_tag(&self, menu: &MenuRecord) -> Option<TagValue> {
        if let Some(expression) = menu.tag_get.as_deref().filter(|t| !t.trim().is_empty()) {
            return match self.engine.evaluate(expression, &self.bindings) {
                Ok(Value::Null) => None,
                Ok(Value::Number(n)) if n.is_i64() => n.as_i64().map(TagValue::Count),
                Ok(value) => Some(TagValue::Text(display(&value))),
                Err(e) => {
                    warn!("Unable to evaluate tag of menu {} : {}", menu.name, e);
                    None
                }
            };
        }

        if !menu.tag_count {
            return None;
        }
        let Some(model) = menu.action_model.as_deref() else {
            warn!("Menu {} counts records but has no action model", menu.name);
            return None;
        };
        self.counter.count(model).map(TagValue::Count)
    }
}
