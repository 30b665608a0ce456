// ============================================================================
// Meta Infrastructure - JSON Fixture Repository
// File: crates/meta-infrastructure/src/fixtures/json_repository.rs
// Description: Users, menus, help texts and record counts read from one file
// ============================================================================

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use meta_core::domain::{MenuRecord, User};
use meta_core::error::DomainError;
use meta_core::repositories::help_repository::base_language;
use meta_core::repositories::{HelpRepository, MenuRepository, UserRepository};

use crate::scripting::StaticRecordCounter;

#[derive(Debug, Clone, Deserialize)]
pub struct HelpEntry {
    pub menu: String,
    pub language: String,
    pub help: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub menus: Vec<MenuRecord>,
    #[serde(default)]
    pub helps: Vec<HelpEntry>,
    /// Record counts keyed by model name
    #[serde(default)]
    pub counts: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default)]
pub struct JsonFixtureRepository {
    data: FixtureData,
}

impl JsonFixtureRepository {
    pub fn new(data: FixtureData) -> Self {
        Self { data }
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            error!("Unable to read fixture {}: {}", path.display(), e);
            DomainError::FixtureError(format!("{}: {}", path.display(), e))
        })?;

        let repo = Self::from_json(&raw)?;
        info!(
            "Loaded fixture {} ({} users, {} menus)",
            path.display(),
            repo.data.users.len(),
            repo.data.menus.len()
        );
        Ok(repo)
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let data: FixtureData =
            serde_json::from_str(raw).map_err(|e| DomainError::FixtureError(e.to_string()))?;
        check_records(&data)?;
        Ok(Self { data })
    }

    pub fn counter(&self) -> StaticRecordCounter {
        StaticRecordCounter::new(self.data.counts.clone())
    }
}

fn check_records(data: &FixtureData) -> Result<(), DomainError> {
    for user in &data.users {
        user.validate()?;
    }
    for menu in &data.menus {
        menu.validate()?;
    }
    Ok(())
}

/// Help texts for `locale`, exact language first, then its base language.
pub fn help_dictionary(entries: &[HelpEntry], locale: &str) -> HashMap<String, String> {
    let base = base_language(locale);
    let mut helps = HashMap::new();

    for entry in entries.iter().filter(|e| e.language == base && e.language != locale) {
        helps.insert(entry.menu.clone(), entry.help.clone());
    }
    for entry in entries.iter().filter(|e| e.language == locale) {
        helps.insert(entry.menu.clone(), entry.help.clone());
    }

    helps
}

#[async_trait]
impl MenuRepository for JsonFixtureRepository {
    async fn fetch_menus(&self) -> Result<Vec<MenuRecord>, DomainError> {
        Ok(self.data.menus.clone())
    }
}

#[async_trait]
impl HelpRepository for JsonFixtureRepository {
    async fn fetch_help(&self, locale: &str) -> Result<HashMap<String, String>, DomainError> {
        Ok(help_dictionary(&self.data.helps, locale))
    }
}

#[async_trait]
impl UserRepository for JsonFixtureRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .data
            .users
            .iter()
            .find(|u| u.code == code && u.is_active)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripting::RecordCounter;

    const FIXTURE: &str = r#"{
        "users": [
            {"code": "jdoe", "name": "John", "group": "sales", "roles": ["sales"]},
            {"code": "gone", "name": "Gone", "is_active": false}
        ],
        "menus": [
            {"id": "6f1c2a8e-0000-4000-8000-000000000001", "name": "menu-sales", "title": "Sales"},
            {"id": "6f1c2a8e-0000-4000-8000-000000000002", "name": "menu-orders", "title": "Orders",
             "parentId": "6f1c2a8e-0000-4000-8000-000000000001", "tagCount": true,
             "actionModel": "sale.Order"}
        ],
        "helps": [
            {"menu": "menu-sales", "language": "fr", "help": "Ventes"},
            {"menu": "menu-sales", "language": "fr-CA", "help": "Ventes (CA)"},
            {"menu": "menu-orders", "language": "fr", "help": "Commandes"},
            {"menu": "menu-orders", "language": "en", "help": "Orders"}
        ],
        "counts": {"sale.Order": 4}
    }"#;

    #[tokio::test]
    async fn test_load_from_json() {
        let repo = JsonFixtureRepository::from_json(FIXTURE).unwrap();

        let menus = repo.fetch_menus().await.unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[1].parent_id, Some(menus[0].id));

        let user = repo.find_by_code("jdoe").await.unwrap().unwrap();
        assert_eq!(user.group.as_deref(), Some("sales"));
        assert!(repo.find_by_code("gone").await.unwrap().is_none());
        assert!(repo.find_by_code("nobody").await.unwrap().is_none());

        assert_eq!(repo.counter().count("sale.Order"), Some(4));
    }

    #[tokio::test]
    async fn test_help_precedence() {
        let repo = JsonFixtureRepository::from_json(FIXTURE).unwrap();

        let helps = repo.fetch_help("fr-CA").await.unwrap();
        assert_eq!(helps["menu-sales"], "Ventes (CA)");
        assert_eq!(helps["menu-orders"], "Commandes");

        let helps = repo.fetch_help("en").await.unwrap();
        assert_eq!(helps.len(), 1);
        assert!(!helps.contains_key("menu-sales"));

        assert!(repo.fetch_help("de").await.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_records_rejected() {
        let raw = r#"{"menus": [{"id": "6f1c2a8e-0000-4000-8000-000000000001", "name": "", "title": "x"}]}"#;
        assert!(matches!(
            JsonFixtureRepository::from_json(raw),
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            JsonFixtureRepository::from_json("{"),
            Err(DomainError::FixtureError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = JsonFixtureRepository::load("does/not/exist.json").await;
        assert!(matches!(result, Err(DomainError::FixtureError(_))));
    }

    #[tokio::test]
    async fn test_empty_fixture() {
        let repo = JsonFixtureRepository::from_json("{}").unwrap();
        assert!(repo.fetch_menus().await.unwrap().is_empty());
        assert!(repo.counter().count("sale.Order").is_none());
    }
}
