//! Driven port for the external product catalog.
//!
//! The catalog is queried once per SKU. Payloads are passed through
//! unchanged so events keep whatever the catalog returned.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SkuCode;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the external catalog.
    pub enum CatalogSourceError {
        /// The catalog has no product for the SKU.
        NotFound { sku_code: String } =>
            "catalog product {sku_code} not found",
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "catalog transport failed: {message}",
        /// Catalog call exceeded its timeout.
        Timeout { message: String } =>
            "catalog timeout: {message}",
        /// Catalog rate-limited the request.
        RateLimited { message: String } =>
            "catalog rate limited request: {message}",
        /// Catalog response could not be decoded.
        Decode { message: String } =>
            "catalog response decode failed: {message}",
        /// Catalog rejected the request or failed server-side.
        InvalidRequest { message: String } =>
            "catalog request invalid: {message}",
    }
}

impl CatalogSourceError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Stable label used in logs and reconciliation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::RateLimited { .. } => "rate_limited",
            Self::Decode { .. } => "decode",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }
}

/// Port for looking up products in the external catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogSource: Send + Sync {
    /// Fetch the catalog payload for one SKU.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use merchant_events::domain::SkuCode;
    /// use merchant_events::domain::ports::{
    ///     CatalogSourceError, FixtureProductCatalogSource, ProductCatalogSource,
    /// };
    ///
    /// let source = FixtureProductCatalogSource;
    /// let sku = SkuCode::new("1234567AC")?;
    /// let err = source.fetch_product(&sku).await.unwrap_err();
    /// assert!(matches!(err, CatalogSourceError::NotFound { .. }));
    /// ```
    async fn fetch_product(&self, sku_code: &SkuCode) -> Result<Value, CatalogSourceError>;
}

/// Fixture implementation that knows no products.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureProductCatalogSource;

#[async_trait]
impl ProductCatalogSource for FixtureProductCatalogSource {
    async fn fetch_product(&self, sku_code: &SkuCode) -> Result<Value, CatalogSourceError> {
        Err(CatalogSourceError::not_found(sku_code.as_str()))
    }
}
