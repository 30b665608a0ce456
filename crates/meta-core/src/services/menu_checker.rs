// ============================================================================
// Meta Core - Menu Checker
// File: crates/meta-core/src/services/menu_checker.rs
// ============================================================================
//! Per-user access and visibility checks for menu records

use chrono::{NaiveDate, Utc};
use meta_script::Bindings;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{MenuRecord, User};
use crate::ports::{ConditionEvaluator, PermissionResolver};

/// Request-scoped values visible to menu conditions.
#[derive(Debug, Clone)]
pub struct MenuContext {
    pub locale: String,
    pub date: NaiveDate,
    /// Additional bindings merged under the built-in ones
    pub extra: Bindings,
}

impl MenuContext {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            date: Utc::now().date_naive(),
            extra: Bindings::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_binding(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }
}

/// Checks menus for one user.
pub struct MenuChecker<'a> {
    user: &'a User,
    permissions: &'a dyn PermissionResolver,
    conditions: &'a dyn ConditionEvaluator,
    bindings: Bindings,
    is_admin: bool,
}

impl<'a> MenuChecker<'a> {
    pub fn new(
        user: &'a User,
        context: &MenuContext,
        permissions: &'a dyn PermissionResolver,
        conditions: &'a dyn ConditionEvaluator,
    ) -> Self {
        let mut bindings = context.extra.clone();
        bindings.insert("__user__".into(), user.to_binding());
        bindings.insert("__date__".into(), Value::String(context.date.to_string()));
        bindings.insert("__locale__".into(), Value::String(context.locale.clone()));

        Self {
            user,
            permissions,
            conditions,
            bindings,
            is_admin: permissions.is_admin(user),
        }
    }

    /// Module installed and, for restricted menus, a matching role or group.
    pub fn is_allowed(&self, menu: &MenuRecord) -> bool {
        if let Some(module) = non_blank(menu.module_to_check.as_deref()) {
            if !self.permissions.is_module_enabled(module) {
                debug!("Menu {} hidden, module {} is not enabled", menu.name, module);
                return false;
            }
        }

        if !menu.is_restricted() || self.is_admin {
            return true;
        }

        (!menu.roles.is_empty() && self.permissions.has_any_role(self.user, &menu.roles))
            || (!menu.groups.is_empty() && self.permissions.in_any_group(self.user, &menu.groups))
    }

    /// Evaluates `conditionToCheck`. Evaluation failures hide the menu.
    pub fn can_show(&self, menu: &MenuRecord) -> bool {
        let Some(condition) = non_blank(menu.condition_to_check.as_deref()) else {
            return true;
        };

        match self.conditions.evaluate_boolean(condition, &self.bindings) {
            Ok(show) => show,
            Err(e) => {
                error!("Unable to evaluate menu {} : {}", menu.name, e);
                false
            }
        }
    }

    pub fn check(&self, menu: &MenuRecord) -> bool {
        self.is_allowed(menu) && self.can_show(menu)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockConditionEvaluator, MockPermissionResolver};
    use meta_script::ScriptError;

    fn user() -> User {
        User::new("demo", "Demo").unwrap().with_group("users")
    }

    fn permissions(admin: bool) -> MockPermissionResolver {
        let mut permissions = MockPermissionResolver::new();
        permissions.expect_is_admin().return_const(admin);
        permissions
    }

    #[test]
    fn test_unrestricted_menu_is_allowed() {
        let user = user();
        let permissions = permissions(false);
        let conditions = MockConditionEvaluator::new();
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        assert!(checker.is_allowed(&MenuRecord::new("menu-home", "Home").unwrap()));
    }

    #[test]
    fn test_role_restriction_delegates() {
        let user = user();
        let mut permissions = permissions(false);
        permissions
            .expect_has_any_role()
            .returning(|_, roles| roles.iter().any(|r| r == "sales"));
        permissions.expect_in_any_group().returning(|_, _| false);
        let conditions = MockConditionEvaluator::new();
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let sales = MenuRecord::new("menu-sales", "Sales").unwrap().with_roles(["sales"]);
        let admin = MenuRecord::new("menu-admin", "Admin").unwrap().with_roles(["admin"]);
        let hr = MenuRecord::new("menu-hr", "HR").unwrap().with_groups(["hr"]);

        assert!(checker.is_allowed(&sales));
        assert!(!checker.is_allowed(&admin));
        assert!(!checker.is_allowed(&hr));
    }

    #[test]
    fn test_group_restriction() {
        let user = user();
        let mut permissions = permissions(false);
        permissions.expect_has_any_role().never();
        permissions
            .expect_in_any_group()
            .returning(|user, groups| groups.iter().any(|g| Some(g) == user.group.as_ref()));
        let conditions = MockConditionEvaluator::new();
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let menu = MenuRecord::new("menu-users", "Users").unwrap().with_groups(["users"]);
        assert!(checker.is_allowed(&menu));
    }

    #[test]
    fn test_admin_bypasses_roles_but_not_modules() {
        let user = user();
        let mut permissions = permissions(true);
        permissions.expect_has_any_role().never();
        permissions
            .expect_is_module_enabled()
            .withf(|name| name == "hr")
            .return_const(false);
        let conditions = MockConditionEvaluator::new();
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let restricted = MenuRecord::new("menu-admin", "Admin").unwrap().with_roles(["admin"]);
        let module = MenuRecord::new("menu-hr", "HR").unwrap().with_module("hr");

        assert!(checker.is_allowed(&restricted));
        assert!(!checker.is_allowed(&module));
    }

    #[test]
    fn test_blank_condition_shows_without_evaluation() {
        let user = user();
        let permissions = permissions(false);
        let mut conditions = MockConditionEvaluator::new();
        conditions.expect_evaluate_boolean().never();
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let menu = MenuRecord::new("menu-home", "Home").unwrap().with_condition("   ");
        assert!(checker.can_show(&menu));
    }

    #[test]
    fn test_condition_sees_user_binding() {
        let user = user();
        let permissions = permissions(false);
        let mut conditions = MockConditionEvaluator::new();
        conditions
            .expect_evaluate_boolean()
            .withf(|expr, bindings| {
                expr == "__user__.group == 'users'" && bindings["__user__"]["code"] == "demo"
            })
            .returning(|_, _| Ok(true));
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let menu = MenuRecord::new("menu-team", "Team")
            .unwrap()
            .with_condition("__user__.group == 'users'");
        assert!(checker.can_show(&menu));
    }

    #[test]
    fn test_condition_failure_fails_closed() {
        let user = user();
        let permissions = permissions(false);
        let mut conditions = MockConditionEvaluator::new();
        conditions
            .expect_evaluate_boolean()
            .returning(|_, _| Err(ScriptError::UnknownBinding("__company__".into())));
        let checker = MenuChecker::new(&user, &MenuContext::new("en"), &permissions, &conditions);

        let menu = MenuRecord::new("menu-broken", "Broken")
            .unwrap()
            .with_condition("__company__.code == 'x'");
        assert!(!checker.can_show(&menu));
        assert!(!checker.check(&menu));
    }

    struct Script;

    impl ConditionEvaluator for Script {
        fn evaluate_boolean(
            &self,
            expression: &str,
            bindings: &Bindings,
        ) -> Result<bool, ScriptError> {
            meta_script::Engine.evaluate_bool(expression, bindings)
        }
    }

    #[test]
    fn test_deeply_nested_condition_is_hidden() {
        let condition = format!("{}true{}", "(".repeat(50_000), ")".repeat(50_000));

        let shown = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let user = user();
                let permissions = permissions(false);
                let context = MenuContext::new("en");
                let checker = MenuChecker::new(&user, &context, &permissions, &Script);
                let menu = MenuRecord::new("menu-nested", "Nested")
                    .unwrap()
                    .with_condition(&condition);
                checker.can_show(&menu)
            })
            .unwrap()
            .join()
            .unwrap();

        assert!(!shown);
    }

    #[test]
    fn test_context_bindings() {
        let user = user();
        let permissions = permissions(false);
        let conditions = MockConditionEvaluator::new();
        let context = MenuContext::new("fr-CA")
            .with_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .with_binding("__config__", serde_json::json!({"mode": "dev"}));
        let checker = MenuChecker::new(&user, &context, &permissions, &conditions);

        let bindings = checker.bindings();
        assert_eq!(bindings["__date__"], "2024-02-29");
        assert_eq!(bindings["__locale__"], "fr-CA");
        assert_eq!(bindings["__config__"]["mode"], "dev");
    }
}
