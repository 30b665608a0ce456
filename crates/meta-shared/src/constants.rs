//! Application-wide constants

pub const DEFAULT_APP_NAME: &str = "meta-console";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_ADMIN_CODE: &str = "admin";
pub const DEFAULT_ADMIN_GROUP: &str = "admins";
pub const DEFAULT_FIXTURE_PATH: &str = "config/fixtures/menus.json";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
