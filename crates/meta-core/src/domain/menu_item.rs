//! Menu item, the client-facing projection of an allowed menu

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Tag displayed next to a menu entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagValue {
    Count(i64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub order: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_background: Option<String>,
    pub has_tag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_style: Option<String>,
    pub left: bool,
    pub mobile: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_to_check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_to_check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Name of the enclosing menu
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagValue>,
}

/// Ascending `order`, then title, then name.
pub fn compare_menu_items(a: &MenuItem, b: &MenuItem) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.name.cmp(&b.name))
}

/// Stable sort with [`compare_menu_items`].
pub fn sort_menu_items(items: &mut [MenuItem]) {
    items.sort_by(compare_menu_items);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, title: &str, order: i32) -> MenuItem {
        MenuItem {
            name: name.into(),
            title: title.into(),
            order,
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_order_then_title() {
        let mut items = vec![
            item("c", "Zeta", 1),
            item("a", "Alpha", 2),
            item("b", "Beta", 1),
            item("d", "Beta", 1),
        ];
        sort_menu_items(&mut items);

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_serialize_camel_case_skips_empty() {
        let mut menu = item("menu-sales", "Sales", 5);
        menu.icon_background = Some("#fff".into());
        menu.tag = Some(TagValue::Count(3));

        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["iconBackground"], "#fff");
        assert_eq!(json["tag"], 3);
        assert_eq!(json["hasTag"], false);
        assert!(json.get("help").is_none());
        assert!(json.get("parent").is_none());
    }
}
