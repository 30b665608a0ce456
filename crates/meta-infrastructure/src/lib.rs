//! # Meta Infrastructure
//!
//! Adapters for the ports of `meta-core`: PostgreSQL and fixture
//! repositories, role-based permissions, scripting and message bundles.

pub mod database;
pub mod fixtures;
pub mod security;
pub mod scripting;
pub mod i18n;

pub use database::{create_pool, run_migrations, PgHelpRepository, PgMenuRepository, PgUserRepository};
pub use fixtures::JsonFixtureRepository;
pub use security::RoleBasedPermissionResolver;
pub use scripting::{RecordCounter, ScriptEvaluator, ScriptTagResolver, StaticRecordCounter};
pub use i18n::JsonMessageBundle;
