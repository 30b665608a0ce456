//! Quick menu entity

use serde::{Deserialize, Serialize};

/// Small shortcut menu contributed by a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickMenu {
    pub title: String,
    pub order: i32,
    pub show_title: bool,
    pub items: Vec<QuickMenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickMenuItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub selected: bool,
}

impl QuickMenu {
    pub fn new(title: &str, order: i32) -> Self {
        Self {
            title: title.to_string(),
            order,
            show_title: true,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: QuickMenuItem) -> Self {
        self.items.push(item);
        self
    }
}
