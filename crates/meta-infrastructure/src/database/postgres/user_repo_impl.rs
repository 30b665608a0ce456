// ============================================================================
// Meta Infrastructure - PostgreSQL User Repository
// File: crates/meta-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use meta_core::domain::User;
use meta_core::error::DomainError;
use meta_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub group_code: Option<String>,
    pub language: Option<String>,
    pub no_help: bool,
    pub is_active: bool,
    pub roles: Vec<String>,
    pub group_roles: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            code: row.code,
            name: row.name,
            group: row.group_code,
            roles: row.roles,
            group_roles: row.group_roles,
            language: row.language,
            no_help: row.no_help,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                u.id, u.code, u.name, g.code AS group_code,
                u.language, u.no_help, u.is_active,
                ARRAY(
                    SELECT r.name FROM meta_user_roles ur
                    JOIN meta_role r ON r.id = ur.role_id
                    WHERE ur.user_id = u.id
                ) AS roles,
                ARRAY(
                    SELECT r.name FROM meta_group_roles gr
                    JOIN meta_role r ON r.id = gr.role_id
                    WHERE gr.group_id = u.group_id
                ) AS group_roles
            FROM meta_user u
            LEFT JOIN meta_group g ON g.id = u.group_id
            WHERE u.code = $1 AND u.is_active
            "#
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by code: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }
}
