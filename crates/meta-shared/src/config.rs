//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;
use crate::constants::{
    DEFAULT_ADMIN_CODE, DEFAULT_ADMIN_GROUP, DEFAULT_APP_NAME, DEFAULT_FIXTURE_PATH,
    DEFAULT_LOCALE, DEFAULT_LOG_LEVEL, DEFAULT_MAX_CONNECTIONS,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub telemetry: TelemetrySettings,
    pub database: DatabaseSettings,
    pub menu: MenuSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Fallback filter when `RUST_LOG` is not set
    pub level: String,
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// PostgreSQL url; fixture files are used when absent
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    pub fixture_path: String,
    pub messages_path: Option<String>,
    pub locale: String,
    pub admin_code: String,
    pub admin_group: String,
    /// Installed modules; every module is considered enabled when empty
    #[serde(default)]
    pub modules: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder(&env)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("menu.modules"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Builder pre-populated with every default, without any file or env source.
    pub fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", env)?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("telemetry.level", DEFAULT_LOG_LEVEL)?
            .set_default("telemetry.json", false)?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("menu.fixture_path", DEFAULT_FIXTURE_PATH)?
            .set_default("menu.locale", DEFAULT_LOCALE)?
            .set_default("menu.admin_code", DEFAULT_ADMIN_CODE)?
            .set_default("menu.admin_group", DEFAULT_ADMIN_GROUP)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.env, "test");
        assert_eq!(config.menu.locale, DEFAULT_LOCALE);
        assert_eq!(config.menu.admin_code, DEFAULT_ADMIN_CODE);
        assert!(config.database.url.is_none());
        assert!(config.menu.modules.is_empty());
        assert!(!config.is_production());
    }

    #[test]
    fn test_override_database_url() {
        let config: AppConfig = AppConfig::builder("production")
            .unwrap()
            .set_override("database.url", "postgres://localhost/meta")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/meta"));
        assert!(config.is_production());
    }
}
