//! Message bundles

pub mod bundle;

pub use bundle::JsonMessageBundle;
