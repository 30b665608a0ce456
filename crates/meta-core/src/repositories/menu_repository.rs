//! Menu repository trait (port)

use async_trait::async_trait;
use crate::domain::MenuRecord;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Every menu record, in storage order.
    async fn fetch_menus(&self) -> Result<Vec<MenuRecord>, DomainError>;
}
