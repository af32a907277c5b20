//! PostgreSQL-backed `MerchantRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::MerchantId;
use crate::domain::ports::{MerchantRepository, RegistryRepositoryError};
use crate::domain::registry::Merchant;

use super::diesel_error_mapping::{
    is_email_constraint, map_registry_error, map_registry_insert_error, map_registry_pool_error,
};
use super::models::MerchantRow;
use super::pool::DbPool;
use super::schema::merchants;

/// Diesel-backed implementation of the merchant repository port.
#[derive(Clone)]
pub struct DieselMerchantRepository {
    pool: DbPool,
}

impl DieselMerchantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<&Merchant> for MerchantRow {
    fn from(merchant: &Merchant) -> Self {
        Self {
            merchant_id: merchant.merchant_id.as_str().to_owned(),
            name: merchant.name.clone(),
            email: merchant.email.clone(),
            postcode: merchant.postcode.clone(),
        }
    }
}

fn row_to_merchant(row: MerchantRow) -> Result<Merchant, RegistryRepositoryError> {
    let merchant_id = MerchantId::new(row.merchant_id)
        .map_err(|err| RegistryRepositoryError::query(err.to_string()))?;
    Ok(Merchant {
        merchant_id,
        name: row.name,
        email: row.email,
        postcode: row.postcode,
    })
}

fn duplicate_message(merchant: &Merchant, constraint: Option<&str>) -> String {
    if is_email_constraint(constraint) {
        format!("merchant email {} already registered", merchant.email)
    } else {
        format!("merchant {} already exists", merchant.merchant_id)
    }
}

#[async_trait]
impl MerchantRepository for DieselMerchantRepository {
    async fn insert(&self, merchant: &Merchant) -> Result<(), RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        diesel::insert_into(merchants::table)
            .values(MerchantRow::from(merchant))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_registry_insert_error(err, |constraint| duplicate_message(merchant, constraint))
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Merchant>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        let rows: Vec<MerchantRow> = merchants::table
            .order(merchants::merchant_id.asc())
            .select(MerchantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_registry_error)?;
        rows.into_iter().map(row_to_merchant).collect()
    }

    async fn find_by_id(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Option<Merchant>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        merchants::table
            .filter(merchants::merchant_id.eq(merchant_id.as_str()))
            .select(MerchantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registry_error)?
            .map(row_to_merchant)
            .transpose()
    }
}
