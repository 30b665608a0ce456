//! Projection of an allowed menu record into a [`MenuItem`]

use std::collections::HashMap;

use crate::domain::{MenuItem, MenuRecord};
use crate::ports::TagResolver;

pub struct MenuItemAssembler<'a> {
    tags: &'a dyn TagResolver,
}

impl<'a> MenuItemAssembler<'a> {
    pub fn new(tags: &'a dyn TagResolver) -> Self {
        Self { tags }
    }

    /// `parent` is the enclosing menu in the built tree, `helps` the help
    /// dictionary fetched for the user's locale.
    pub fn assemble(
        &self,
        menu: &MenuRecord,
        parent: Option<&MenuRecord>,
        helps: &HashMap<String, String>,
    ) -> MenuItem {
        let has_tag = menu.has_tag();

        MenuItem {
            name: menu.name.clone(),
            order: menu.order,
            title: menu.title.clone(),
            icon: menu.icon.clone(),
            icon_background: menu.icon_background.clone(),
            has_tag,
            tag_style: menu.tag_style.clone(),
            left: menu.left,
            mobile: menu.mobile,
            hidden: menu.hidden,
            module_to_check: menu.module_to_check.clone(),
            condition_to_check: menu.condition_to_check.clone(),
            help: helps.get(&menu.name).cloned(),
            parent: parent.map(|p| p.name.clone()),
            action: menu.action.clone(),
            tag: if has_tag { self.tags.resolve_tag(menu) } else { None },
        }
    }
}
