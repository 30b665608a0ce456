// ============================================================================
// Meta Infrastructure - PostgreSQL Help Repository
// File: crates/meta-infrastructure/src/database/postgres/help_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use meta_core::error::DomainError;
use meta_core::repositories::help_repository::{base_language, HelpRepository};

pub struct PgHelpRepository {
    pool: PgPool,
}

impl PgHelpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HelpRow {
    pub menu: String,
    pub help: String,
}

#[async_trait]
impl HelpRepository for PgHelpRepository {
    async fn fetch_help(&self, locale: &str) -> Result<HashMap<String, String>, DomainError> {
        // one row per menu, the exact locale sorting ahead of the base language
        let rows: Vec<HelpRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT ON (h.menu) h.menu, h.help
            FROM meta_help h
            WHERE h.language = $1 OR h.language = $2
            ORDER BY h.menu, (h.language = $1) DESC
            "#
        )
        .bind(locale)
        .bind(base_language(locale))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error fetching help for {}: {}", locale, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| (r.menu, r.help)).collect())
    }
}
