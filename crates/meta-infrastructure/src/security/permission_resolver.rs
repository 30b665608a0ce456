// ============================================================================
// Meta Infrastructure - Role Based Permission Resolver
// File: crates/meta-infrastructure/src/security/permission_resolver.rs
// ============================================================================

use std::collections::HashSet;

use meta_core::domain::User;
use meta_core::ports::PermissionResolver;
use meta_shared::config::MenuSettings;
use tracing::debug;

/// Permission checks over the roles and group carried by the [`User`].
#[derive(Debug, Clone)]
pub struct RoleBasedPermissionResolver {
    admin_code: String,
    admin_group: String,
    /// Enabled modules; empty means no module restriction
    modules: HashSet<String>,
}

impl RoleBasedPermissionResolver {
    pub fn new<I, S>(admin_code: &str, admin_group: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_code: admin_code.to_string(),
            admin_group: admin_group.to_string(),
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_settings(settings: &MenuSettings) -> Self {
        Self::new(&settings.admin_code, &settings.admin_group, settings.modules.iter().cloned())
    }
}

impl PermissionResolver for RoleBasedPermissionResolver {
    fn is_admin(&self, user: &User) -> bool {
        let admin = user.code == self.admin_code || user.group.as_deref() == Some(self.admin_group.as_str());
        if admin {
            debug!("User {} is an administrator", user.code);
        }
        admin
    }

    fn has_any_role(&self, user: &User, roles: &[String]) -> bool {
        roles.iter().any(|role| user.has_role(role))
    }

    fn in_any_group(&self, user: &User, groups: &[String]) -> bool {
        user.group.as_ref().is_some_and(|group| groups.contains(group))
    }

    fn is_module_enabled(&self, name: &str) -> bool {
        self.modules.is_empty() || self.modules.contains(name)
    }
}
