// ============================================================================
// Meta Core - Menu Service
// File: crates/meta-core/src/services/menu_service.rs
// ============================================================================
//! Permission-filtered menu resolution for a user

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    sort_menu_items, MenuItem, MenuNodeResult, MenuNodeVisitor, MenuRecord, MenuTree, NodeId, User,
};
use crate::error::DomainError;
use crate::ports::{ConditionEvaluator, PermissionResolver, TagResolver};
use crate::repositories::{HelpRepository, MenuRepository};

use super::menu_assembler::MenuItemAssembler;
use super::menu_checker::{MenuChecker, MenuContext};

/// Menu service building the visible menu list of a user
pub struct MenuService<M: MenuRepository, H: HelpRepository> {
    menu_repo: Arc<M>,
    help_repo: Arc<H>,
    permissions: Arc<dyn PermissionResolver>,
    conditions: Arc<dyn ConditionEvaluator>,
    tags: Arc<dyn TagResolver>,
}

impl<M: MenuRepository, H: HelpRepository> MenuService<M, H> {
    pub fn new(
        menu_repo: Arc<M>,
        help_repo: Arc<H>,
        permissions: Arc<dyn PermissionResolver>,
        conditions: Arc<dyn ConditionEvaluator>,
        tags: Arc<dyn TagResolver>,
    ) -> Self {
        Self {
            menu_repo,
            help_repo,
            permissions,
            conditions,
            tags,
        }
    }

    /// Ordered menu items the user may see. No user means no menus.
    pub async fn get_menus(
        &self,
        user: Option<&User>,
        context: &MenuContext,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let Some(user) = user else {
            debug!("No current user, returning empty menu");
            return Ok(Vec::new());
        };

        let records = self.menu_repo.fetch_menus().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let helps = if user.no_help {
            HashMap::new()
        } else {
            self.help_repo.fetch_help(&context.locale).await?
        };

        let items = resolve_menus(
            records,
            user,
            context,
            &helps,
            self.permissions.as_ref(),
            self.conditions.as_ref(),
            self.tags.as_ref(),
        );

        info!("Resolved {} menu items for user {}", items.len(), user.code);
        Ok(items)
    }
}

/// Build the tree, walk it with pruning and sort the collected items.
pub fn resolve_menus(
    records: Vec<MenuRecord>,
    user: &User,
    context: &MenuContext,
    helps: &HashMap<String, String>,
    permissions: &dyn PermissionResolver,
    conditions: &dyn ConditionEvaluator,
    tags: &dyn TagResolver,
) -> Vec<MenuItem> {
    let tree = MenuTree::build(records);

    let mut collector = MenuCollector {
        checker: MenuChecker::new(user, context, permissions, conditions),
        assembler: MenuItemAssembler::new(tags),
        helps,
        items: Vec::with_capacity(tree.len()),
    };
    tree.traverse(&mut collector);

    let mut items = collector.items;
    sort_menu_items(&mut items);
    items
}

struct MenuCollector<'a> {
    checker: MenuChecker<'a>,
    assembler: MenuItemAssembler<'a>,
    helps: &'a HashMap<String, String>,
    items: Vec<MenuItem>,
}

impl MenuNodeVisitor for MenuCollector<'_> {
    fn pre_child_visit(&mut self, tree: &MenuTree, child: NodeId) -> MenuNodeResult {
        match tree.record(child) {
            Some(menu) if self.checker.check(menu) => MenuNodeResult::Continue,
            _ => MenuNodeResult::Terminate,
        }
    }

    fn visit(&mut self, tree: &MenuTree, node: NodeId) -> MenuNodeResult {
        if let Some(menu) = tree.record(node) {
            let item = self
                .assembler
                .assemble(menu, tree.parent_record(node), self.helps);
            self.items.push(item);
        }
        MenuNodeResult::Continue
    }
}
