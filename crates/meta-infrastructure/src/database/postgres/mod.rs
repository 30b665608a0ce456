//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod help_repo_impl;
pub mod user_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use help_repo_impl::PgHelpRepository;
pub use user_repo_impl::PgUserRepository;
