//! Driven port for shopper records.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::registry::User;

use super::RegistryRepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`RegistryRepositoryError::Duplicate`] when the user id or
    /// email is already registered.
    async fn insert(&self, user: &User) -> Result<(), RegistryRepositoryError>;

    async fn list(&self) -> Result<Vec<User>, RegistryRepositoryError>;

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RegistryRepositoryError>;
}
