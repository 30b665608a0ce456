//! Tag resolver trait (port)

use crate::domain::{MenuRecord, TagValue};

#[cfg_attr(test, mockall::automock)]
pub trait TagResolver: Send + Sync {
    /// Tag for a menu, `None` when the menu shows no tag.
    fn resolve_tag(&self, menu: &MenuRecord) -> Option<TagValue>;
}
