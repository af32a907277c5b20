//! Driven port for the local product catalog.

use async_trait::async_trait;

use crate::domain::SkuCode;
use crate::domain::registry::Product;

use super::RegistryRepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product; duplicate SKU codes are rejected.
    async fn insert(&self, product: &Product) -> Result<(), RegistryRepositoryError>;

    async fn list(&self) -> Result<Vec<Product>, RegistryRepositoryError>;

    async fn find_by_sku(
        &self,
        sku_code: &SkuCode,
    ) -> Result<Option<Product>, RegistryRepositoryError>;
}
