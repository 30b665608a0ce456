//! Repository traits (ports)

pub mod menu_repository;
pub mod help_repository;
pub mod user_repository;

pub use menu_repository::MenuRepository;
pub use help_repository::HelpRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use help_repository::MockHelpRepository;
