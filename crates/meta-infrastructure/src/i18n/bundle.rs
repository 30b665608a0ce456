//! JSON message bundle: `{ "<language>": { "<key>": "<translation>" } }`

use std::collections::HashMap;
use std::path::Path;

use meta_core::error::DomainError;
use meta_core::ports::MessageResolver;
use meta_core::repositories::help_repository::base_language;
use tracing::{debug, error};

#[derive(Debug, Default, Clone)]
pub struct JsonMessageBundle {
    messages: HashMap<String, String>,
}

impl JsonMessageBundle {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Load the translations of `locale`, base language entries filling the gaps.
    pub async fn load(path: impl AsRef<Path>, locale: &str) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            error!("Unable to read message bundle {}: {}", path.display(), e);
            DomainError::FixtureError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&raw, locale)
    }

    pub fn from_json(raw: &str, locale: &str) -> Result<Self, DomainError> {
        let mut bundles: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(raw).map_err(|e| DomainError::FixtureError(e.to_string()))?;

        let mut messages = bundles.remove(base_language(locale)).unwrap_or_default();
        if let Some(exact) = bundles.remove(locale) {
            messages.extend(exact);
        }

        debug!("Loaded {} messages for {}", messages.len(), locale);
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageResolver for JsonMessageBundle {
    fn get(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(translated) if !translated.is_empty() => translated.clone(),
            _ => key.to_string(),
        }
    }
}
