//! In-process repositories used when no database is configured.
//!
//! Each store keeps its records in insertion order behind a `Mutex`. Unique
//! keys mirror the PostgreSQL constraints so duplicate handling behaves the
//! same with either backend.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::events::Event;
use crate::domain::ports::{
    EventRepository, EventRepositoryError, MerchantRepository, ProductRepository,
    RegistryRepositoryError, UserRepository,
};
use crate::domain::registry::{Merchant, Product, User};
use crate::domain::{MerchantId, SkuCode, UserId};

fn lock<'a, T>(
    store: &'a Mutex<Vec<T>>,
    name: &str,
) -> Result<MutexGuard<'a, Vec<T>>, String> {
    store
        .lock()
        .map_err(|_| format!("{name} store lock poisoned"))
}

/// Append-only event store.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn append(&self, event: &Event) -> Result<(), EventRepositoryError> {
        lock(&self.events, "event")
            .map_err(EventRepositoryError::query)?
            .push(event.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventRepositoryError> {
        Ok(lock(&self.events, "event")
            .map_err(EventRepositoryError::query)?
            .clone())
    }

    async fn list_for_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        Ok(lock(&self.events, "event")
            .map_err(EventRepositoryError::query)?
            .iter()
            .filter(|event| &event.merchant_id == merchant_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMerchantRepository {
    merchants: Mutex<Vec<Merchant>>,
}

#[async_trait]
impl MerchantRepository for InMemoryMerchantRepository {
    async fn insert(&self, merchant: &Merchant) -> Result<(), RegistryRepositoryError> {
        let mut merchants =
            lock(&self.merchants, "merchant").map_err(RegistryRepositoryError::query)?;
        if let Some(existing) = merchants
            .iter()
            .find(|m| m.merchant_id == merchant.merchant_id || m.email == merchant.email)
        {
            let message = if existing.merchant_id == merchant.merchant_id {
                format!("merchant {} already exists", merchant.merchant_id)
            } else {
                format!("merchant email {} already registered", merchant.email)
            };
            return Err(RegistryRepositoryError::duplicate(message));
        }
        merchants.push(merchant.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Merchant>, RegistryRepositoryError> {
        Ok(lock(&self.merchants, "merchant")
            .map_err(RegistryRepositoryError::query)?
            .clone())
    }

    async fn find_by_id(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Option<Merchant>, RegistryRepositoryError> {
        Ok(lock(&self.merchants, "merchant")
            .map_err(RegistryRepositoryError::query)?
            .iter()
            .find(|m| &m.merchant_id == merchant_id)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RegistryRepositoryError> {
        let mut users = lock(&self.users, "user").map_err(RegistryRepositoryError::query)?;
        if let Some(existing) = users
            .iter()
            .find(|u| u.user_id == user.user_id || u.email == user.email)
        {
            let message = if existing.user_id == user.user_id {
                format!("user {} already exists", user.user_id)
            } else {
                format!("user email {} already registered", user.email)
            };
            return Err(RegistryRepositoryError::duplicate(message));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, RegistryRepositoryError> {
        Ok(lock(&self.users, "user")
            .map_err(RegistryRepositoryError::query)?
            .clone())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RegistryRepositoryError> {
        Ok(lock(&self.users, "user")
            .map_err(RegistryRepositoryError::query)?
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), RegistryRepositoryError> {
        let mut products =
            lock(&self.products, "product").map_err(RegistryRepositoryError::query)?;
        if products.iter().any(|p| p.sku_code == product.sku_code) {
            return Err(RegistryRepositoryError::duplicate(format!(
                "product {} already exists",
                product.sku_code
            )));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, RegistryRepositoryError> {
        Ok(lock(&self.products, "product")
            .map_err(RegistryRepositoryError::query)?
            .clone())
    }

    async fn find_by_sku(
        &self,
        sku_code: &SkuCode,
    ) -> Result<Option<Product>, RegistryRepositoryError> {
        Ok(lock(&self.products, "product")
            .map_err(RegistryRepositoryError::query)?
            .iter()
            .find(|p| &p.sku_code == sku_code)
            .cloned())
    }
}
