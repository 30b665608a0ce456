// ============================================================================
// Meta Infrastructure - PostgreSQL Menu Repository
// File: crates/meta-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use meta_core::domain::MenuRecord;
use meta_core::error::DomainError;
use meta_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub parent_id: Option<Uuid>,
    pub order_seq: i32,
    pub icon: Option<String>,
    pub icon_background: Option<String>,
    pub tag_count: bool,
    pub tag_get: Option<String>,
    pub tag_style: Option<String>,
    pub mobile: bool,
    pub hidden: bool,
    pub left_menu: bool,
    pub module_to_check: Option<String>,
    pub condition_to_check: Option<String>,
    pub action: Option<String>,
    pub action_model: Option<String>,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

impl From<MenuRow> for MenuRecord {
    fn from(row: MenuRow) -> Self {
        MenuRecord {
            id: row.id,
            name: row.name,
            title: row.title,
            parent_id: row.parent_id,
            order: row.order_seq,
            icon: row.icon,
            icon_background: row.icon_background,
            tag_count: row.tag_count,
            tag_get: row.tag_get,
            tag_style: row.tag_style,
            mobile: row.mobile,
            hidden: row.hidden,
            left: row.left_menu,
            module_to_check: row.module_to_check,
            condition_to_check: row.condition_to_check,
            action: row.action,
            action_model: row.action_model,
            roles: row.roles,
            groups: row.groups,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn fetch_menus(&self) -> Result<Vec<MenuRecord>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                m.id, m.name, m.title, m.parent_id, m.order_seq,
                m.icon, m.icon_background, m.tag_count, m.tag_get, m.tag_style,
                m.mobile, m.hidden, m.left_menu,
                m.module_to_check, m.condition_to_check, m.action, m.action_model,
                ARRAY(
                    SELECT r.name FROM meta_menu_roles mr
                    JOIN meta_role r ON r.id = mr.role_id
                    WHERE mr.menu_id = m.id
                    ORDER BY r.name
                ) AS roles,
                ARRAY(
                    SELECT g.code FROM meta_menu_groups mg
                    JOIN meta_group g ON g.id = mg.group_id
                    WHERE mg.menu_id = m.id
                    ORDER BY g.code
                ) AS groups
            FROM meta_menu m
            ORDER BY m.order_seq, m.name, m.id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error fetching menus: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Fetched {} menu records", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
