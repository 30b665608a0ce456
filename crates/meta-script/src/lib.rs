//! # Meta Script
//!
//! Small expression language used by menu conditions, validator tests,
//! message templates and tag expressions.
//!
//! Values are [`serde_json::Value`]s, bindings are a JSON object map.
//!
//! ```
//! use meta_script::{Bindings, Engine};
//! use serde_json::json;
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("amount".into(), json!(120));
//!
//! let engine = Engine::new();
//! assert!(engine.evaluate_bool("amount > 100 && amount < 200", &bindings).unwrap());
//! assert_eq!(engine.interpolate("Total: ${amount}", &bindings).unwrap(), "Total: 120");
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod template;
pub mod value;

pub use engine::Engine;
pub use error::ScriptError;
pub use value::{display, is_truthy};

/// Variables visible to an expression.
pub type Bindings = serde_json::Map<String, serde_json::Value>;
