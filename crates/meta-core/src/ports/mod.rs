//! Ports consumed by the menu and validation services.
//!
//! All of them are synchronous: a menu resolution or a validator pass runs
//! to completion without suspending.

pub mod permission;
pub mod scripting;
pub mod i18n;
pub mod tags;

pub use permission::PermissionResolver;
pub use scripting::{ConditionEvaluator, ExpressionEvaluator};
pub use i18n::{format_positional, MessageResolver, PassThroughMessages};
pub use tags::TagResolver;

#[cfg(test)]
pub use permission::MockPermissionResolver;
#[cfg(test)]
pub use scripting::{MockConditionEvaluator, MockExpressionEvaluator};
#[cfg(test)]
pub use i18n::MockMessageResolver;
#[cfg(test)]
pub use tags::MockTagResolver;
