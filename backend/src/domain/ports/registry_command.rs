//! Driving port for registry mutations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::registry::{Merchant, Product, User};

/// Use-case port for registering merchants, users, and products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryCommand: Send + Sync {
    async fn register_merchant(&self, body: &Value) -> Result<Merchant, Error>;

    async fn register_user(&self, body: &Value) -> Result<User, Error>;

    async fn register_product(&self, body: &Value) -> Result<Product, Error>;
}
