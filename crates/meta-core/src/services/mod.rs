//! Domain services (business logic)

pub mod menu_checker;
pub mod menu_assembler;
pub mod menu_service;
pub mod action_validate;
pub mod quick_menu_service;

pub use menu_checker::{MenuChecker, MenuContext};
pub use menu_assembler::MenuItemAssembler;
pub use menu_service::{resolve_menus, MenuService};
pub use action_validate::{evaluate, resume, ActionHandler, ChainState, ValidationOutcome};
pub use quick_menu_service::{QuickMenuCreator, QuickMenuService};
