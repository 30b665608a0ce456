//! Help repository trait (port)

use std::collections::HashMap;

use async_trait::async_trait;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HelpRepository: Send + Sync {
    /// Help texts keyed by menu name, fetched in one go.
    ///
    /// A help written for `locale` wins over one written for its base
    /// language (`fr` for `fr-CA`); menus with neither have no entry.
    async fn fetch_help(&self, locale: &str) -> Result<HashMap<String, String>, DomainError>;
}

/// Base language of a locale tag: `fr` for `fr-CA` or `fr_CA`.
pub fn base_language(locale: &str) -> &str {
    locale.split(|c: char| c == '-' || c == '_').next().unwrap_or(locale)
}
