//! Adapters backed by the `meta-script` expression engine

pub mod script_evaluator;
pub mod tag_resolver;

pub use script_evaluator::ScriptEvaluator;
pub use tag_resolver::{RecordCounter, ScriptTagResolver, StaticRecordCounter};
