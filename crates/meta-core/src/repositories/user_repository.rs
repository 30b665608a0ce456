//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::User;
use crate::error::DomainError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<User>, DomainError>;
}
