//! User domain entity

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

/// The user a menu is resolved for, passed explicitly into every check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[validate(length(min = 1, max = 60, message = "User code must be between 1 and 60 characters"))]
    pub code: String,

    pub name: String,

    /// Code of the group the user belongs to
    #[serde(default)]
    pub group: Option<String>,

    /// Roles granted directly
    #[serde(default)]
    pub roles: Vec<String>,

    /// Roles granted through the group
    #[serde(default)]
    pub group_roles: Vec<String>,

    #[serde(default)]
    pub language: Option<String>,

    /// User opted out of menu help texts
    #[serde(default)]
    pub no_help: bool,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(code: &str, name: &str) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            group: None,
            roles: Vec::new(),
            group_roles: Vec::new(),
            language: None,
            no_help: false,
            is_active: true,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
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

    pub fn with_group_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_no_help(mut self, no_help: bool) -> Self {
        self.no_help = no_help;
        self
    }

    /// Direct roles followed by group roles.
    pub fn all_roles(&self) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .chain(self.group_roles.iter())
            .map(String::as_str)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.all_roles().any(|r| r == role)
    }

    /// Projection exposed to condition expressions as `__user__`.
    pub fn to_binding(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "code": self.code,
            "name": self.name,
            "group": self.group,
            "roles": self.all_roles().collect::<Vec<_>>(),
            "language": self.language,
        })
    }
}
