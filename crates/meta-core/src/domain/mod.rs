//! # Meta Core - Domain Module
//!
//! Domain entities for menu resolution and action validation.

pub mod user;
pub mod menu_record;
pub mod menu_node;
pub mod menu_item;
pub mod quick_menu;
pub mod validate;
pub mod resume;

// Re-export all entities and enums
pub use user::User;
pub use menu_record::MenuRecord;
pub use menu_node::{MenuNode, MenuNodeResult, MenuNodeVisitor, MenuTree, NodeId};
pub use menu_item::{compare_menu_items, sort_menu_items, MenuItem, TagValue};
pub use quick_menu::{QuickMenu, QuickMenuItem};
pub use validate::{ActionValidate, Validator, ValidatorKind, ValidatorMessage};
pub use resume::ResumeToken;
