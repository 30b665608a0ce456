//! Quick menus contributed by registered creators

use std::sync::Arc;

use tracing::debug;

use crate::domain::QuickMenu;

/// Source of one quick menu, usually one per installed module.
pub trait QuickMenuCreator: Send + Sync {
    /// `None` when the menu does not apply to the current context.
    fn create(&self) -> Option<QuickMenu>;
}

#[derive(Default)]
pub struct QuickMenuService {
    creators: Vec<Arc<dyn QuickMenuCreator>>,
}

impl QuickMenuService {
    pub fn new(creators: Vec<Arc<dyn QuickMenuCreator>>) -> Self {
        Self { creators }
    }

    pub fn register(&mut self, creator: Arc<dyn QuickMenuCreator>) {
        self.creators.push(creator);
    }

    /// Non-empty quick menus, stably sorted by `order`.
    pub fn get(&self) -> Vec<QuickMenu> {
        let mut menus: Vec<QuickMenu> = self
            .creators
            .iter()
            .filter_map(|creator| creator.create())
            .filter(|menu| !menu.items.is_empty())
            .collect();

        menus.sort_by_key(|menu| menu.order);
        debug!("Collected {} quick menus", menus.len());
        menus
    }
}
