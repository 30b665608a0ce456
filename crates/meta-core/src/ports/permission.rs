//! Permission resolver trait (port)

use crate::domain::User;

#[cfg_attr(test, mockall::automock)]
pub trait PermissionResolver: Send + Sync {
    /// Administrators see every menu their conditions allow.
    fn is_admin(&self, user: &User) -> bool;

    /// User holds one of the roles, directly or through their group.
    fn has_any_role(&self, user: &User, roles: &[String]) -> bool;

    fn in_any_group(&self, user: &User, groups: &[String]) -> bool;

    fn is_module_enabled(&self, name: &str) -> bool;
}
