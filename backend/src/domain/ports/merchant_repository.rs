//! Driven port for merchant records.

use async_trait::async_trait;

use crate::domain::MerchantId;
use crate::domain::registry::Merchant;

use super::RegistryRepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MerchantRepository: Send + Sync {
    /// Insert a new merchant.
    ///
    /// Fails with [`RegistryRepositoryError::Duplicate`] when the merchant id
    /// or email is already registered.
    async fn insert(&self, merchant: &Merchant) -> Result<(), RegistryRepositoryError>;

    async fn list(&self) -> Result<Vec<Merchant>, RegistryRepositoryError>;

    async fn find_by_id(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Option<Merchant>, RegistryRepositoryError>;
}
