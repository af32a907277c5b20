//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::SkuCode;
use crate::domain::ports::{ProductRepository, RegistryRepositoryError};
use crate::domain::registry::Product;

use super::diesel_error_mapping::{
    map_registry_error, map_registry_insert_error, map_registry_pool_error,
};
use super::models::ProductRow;
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed implementation of the local product catalog.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: ProductRow) -> Result<Product, RegistryRepositoryError> {
    let sku_code =
        SkuCode::new(row.sku_code).map_err(|err| RegistryRepositoryError::query(err.to_string()))?;
    Ok(Product {
        sku_code,
        price: row.price,
        name: row.name,
    })
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), RegistryRepositoryError> {
        let row = ProductRow {
            sku_code: product.sku_code.as_str().to_owned(),
            name: product.name.clone(),
            price: product.price,
        };
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        diesel::insert_into(products::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_registry_insert_error(err, |_| {
                    format!("product {} already exists", product.sku_code)
                })
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .order(products::sku_code.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_registry_error)?;
        rows.into_iter().map(row_to_product).collect()
    }

    async fn find_by_sku(
        &self,
        sku_code: &SkuCode,
    ) -> Result<Option<Product>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        products::table
            .find(sku_code.as_str())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registry_error)?
            .map(row_to_product)
            .transpose()
    }
}
