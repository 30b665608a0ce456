// ============================================================================
// Meta Core - Menu Record Entity
// File: crates/meta-core/src/domain/menu_record.rs
// Description: Persisted menu definition, one row of the flat menu table
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Menu record as stored. Read-only to menu resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: String,

    pub title: String,

    #[serde(default)]
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub order: i32,

    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_background: Option<String>,

    #[serde(default)]
    pub tag_count: bool,
    #[serde(default)]
    pub tag_get: Option<String>,
    #[serde(default)]
    pub tag_style: Option<String>,

    #[serde(default)]
    pub mobile: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_left")]
    pub left: bool,

    #[serde(default)]
    pub module_to_check: Option<String>,
    #[serde(default)]
    pub condition_to_check: Option<String>,

    /// Name of the action opened by the menu
    #[serde(default)]
    pub action: Option<String>,
    /// Model targeted by the action, used for tag counts
    #[serde(default)]
    pub action_model: Option<String>,

    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

fn default_left() -> bool {
    true
}

impl MenuRecord {
    pub fn new(name: &str, title: &str) -> Result<Self, validator::ValidationErrors> {
        let menu = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            title: title.trim().to_string(),
            parent_id: None,
            order: 0,
            icon: None,
            icon_background: None,
            tag_count: false,
            tag_get: None,
            tag_style: None,
            mobile: false,
            hidden: false,
            left: true,
            module_to_check: None,
            condition_to_check: None,
            action: None,
            action_model: None,
            roles: Vec::new(),
            groups: Vec::new(),
        };

        menu.validate()?;
        Ok(menu)
    }

    pub fn with_parent(mut self, parent: &MenuRecord) -> Self {
        self.parent_id = Some(parent.id);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition_to_check = Some(condition.to_string());
        self
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module_to_check = Some(module.to_string());
        self
    }

    /// True when access is limited to some roles or groups.
    pub fn is_restricted(&self) -> bool {
        !self.roles.is_empty() || !self.groups.is_empty()
    }

    /// Tag is shown when counting records or a tag expression is set.
    pub fn has_tag(&self) -> bool {
        self.tag_count || self.tag_get.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_menu() {
        let menu = MenuRecord::new("menu-sales", "Sales").unwrap();
        assert!(menu.parent_id.is_none());
        assert!(!menu.is_restricted());
        assert!(!menu.has_tag());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(MenuRecord::new("", "Nothing").is_err());
    }

    #[test]
    fn test_has_tag() {
        let mut menu = MenuRecord::new("menu-orders", "Orders").unwrap();
        menu.tag_get = Some(String::new());
        assert!(!menu.has_tag());

        menu.tag_get = Some("size(orders)".into());
        assert!(menu.has_tag());

        menu.tag_get = None;
        menu.tag_count = true;
        assert!(menu.has_tag());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "name": "menu-root",
            "title": "Root",
            "roles": ["sales"]
        }"#;
        let menu: MenuRecord = serde_json::from_str(json).unwrap();
        assert_eq!(menu.order, 0);
        assert!(menu.is_restricted());
        assert!(menu.parent_id.is_none());
        assert!(menu.left);
    }
}
