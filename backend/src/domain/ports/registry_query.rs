//! Driving port for registry reads.
//!
//! Identifier arguments are raw path values. Implementations reject values of
//! the wrong length as invalid requests and report unknown ids as not found.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::registry::{Merchant, Product, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    async fn list_merchants(&self) -> Result<Vec<Merchant>, Error>;

    async fn find_merchant(&self, merchant_id: &str) -> Result<Merchant, Error>;

    async fn list_users(&self) -> Result<Vec<User>, Error>;

    async fn find_user(&self, user_id: &str) -> Result<User, Error>;

    async fn list_products(&self) -> Result<Vec<Product>, Error>;

    async fn find_product(&self, sku_code: &str) -> Result<Product, Error>;

    /// Fetch the external catalog payload for one SKU.
    async fn lookup_catalog_product(&self, sku_code: &str) -> Result<Value, Error>;
}
