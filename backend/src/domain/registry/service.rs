//! Registry use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::{Merchant, Product, User};
use crate::domain::ports::{
    CatalogSourceError, MerchantRepository, ProductCatalogSource, ProductRepository,
    RegistryCommand, RegistryQuery, RegistryRepositoryError, UserRepository,
};
use crate::domain::validation::rule_violation;
use crate::domain::{Error, MerchantId, SkuCode, UserId};

fn map_repository_error(error: RegistryRepositoryError) -> Error {
    match error {
        RegistryRepositoryError::Connection { message } => {
            Error::internal(format!("registry unavailable: {message}"))
        }
        RegistryRepositoryError::Query { message } => {
            Error::internal(format!("registry error: {message}"))
        }
        RegistryRepositoryError::Duplicate { message } => Error::internal(message),
    }
}

fn map_catalog_error(error: CatalogSourceError) -> Error {
    match error {
        CatalogSourceError::NotFound { .. } => Error::not_found(error.to_string()),
        other => Error::internal(other.to_string()),
    }
}

/// Service implementing the registry driving ports.
pub struct RegistryService {
    merchants: Arc<dyn MerchantRepository>,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    catalog: Arc<dyn ProductCatalogSource>,
}

impl RegistryService {
    pub fn new(
        merchants: Arc<dyn MerchantRepository>,
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        catalog: Arc<dyn ProductCatalogSource>,
    ) -> Self {
        Self {
            merchants,
            users,
            products,
            catalog,
        }
    }
}

#[async_trait]
impl RegistryCommand for RegistryService {
    async fn register_merchant(&self, body: &Value) -> Result<Merchant, Error> {
        let merchant = Merchant::from_registration(body)?;
        self.merchants
            .insert(&merchant)
            .await
            .map_err(map_repository_error)?;
        info!(merchant_id = %merchant.merchant_id, "merchant registered");
        Ok(merchant)
    }

    async fn register_user(&self, body: &Value) -> Result<User, Error> {
        let user = User::from_registration(body)?;
        self.users.insert(&user).await.map_err(map_repository_error)?;
        info!(user_id = %user.user_id, "user registered");
        Ok(user)
    }

    async fn register_product(&self, body: &Value) -> Result<Product, Error> {
        let product = Product::from_registration(body)?;
        self.products
            .insert(&product)
            .await
            .map_err(map_repository_error)?;
        info!(sku_code = %product.sku_code, "product registered");
        Ok(product)
    }
}

#[async_trait]
impl RegistryQuery for RegistryService {
    async fn list_merchants(&self) -> Result<Vec<Merchant>, Error> {
        self.merchants.list().await.map_err(map_repository_error)
    }

    async fn find_merchant(&self, merchant_id: &str) -> Result<Merchant, Error> {
        let merchant_id = MerchantId::new(merchant_id)
            .map_err(|err| rule_violation("merchantID", "invalid_length", err.to_string()))?;
        self.merchants
            .find_by_id(&merchant_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("merchant {merchant_id} not found")))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_repository_error)
    }

    async fn find_user(&self, user_id: &str) -> Result<User, Error> {
        let user_id = UserId::new(user_id)
            .map_err(|err| rule_violation("userID", "invalid_length", err.to_string()))?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.products.list().await.map_err(map_repository_error)
    }

    async fn find_product(&self, sku_code: &str) -> Result<Product, Error> {
        let sku_code = parse_sku(sku_code)?;
        self.products
            .find_by_sku(&sku_code)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {sku_code} not found")))
    }

    async fn lookup_catalog_product(&self, sku_code: &str) -> Result<Value, Error> {
        let sku_code = parse_sku(sku_code)?;
        self.catalog
            .fetch_product(&sku_code)
            .await
            .map_err(map_catalog_error)
    }
}

fn parse_sku(raw: &str) -> Result<SkuCode, Error> {
    SkuCode::new(raw).map_err(|err| rule_violation("skuCode", "invalid_length", err.to_string()))
}
