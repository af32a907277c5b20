//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `MERCHANT_EVENTS_*` environment variables or a
//! configuration file. Every field is optional; accessors apply the defaults
//! and validate the raw values.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::events::classifier::ParseEmptyLineItemsPolicyError;
use crate::domain::events::{CatalogReconcilerConfig, ClassifierPolicy, EmptyLineItemsPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_CATALOG_BASE_URL: &str = "https://dev.backend.usehero.com";
const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_CATALOG_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_CATALOG_MAX_CONCURRENCY: usize = 8;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("bind_addr `{value}` is not a socket address: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("catalog_base_url `{value}` is not a URL: {source}")]
    CatalogBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error(transparent)]
    EmptyLineItems(#[from] ParseEmptyLineItemsPolicyError),
}

/// Service settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MERCHANT_EVENTS")]
pub struct AppSettings {
    /// Listen address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Base URL of the external product catalog.
    pub catalog_base_url: Option<String>,
    /// Per-attempt catalog lookup timeout in milliseconds.
    pub catalog_timeout_ms: Option<u64>,
    /// Attempts per catalog lookup, including the first.
    pub catalog_max_attempts: Option<u32>,
    /// Catalog lookups allowed in flight at once.
    pub catalog_max_concurrency: Option<usize>,
    /// `allow` or `reject` transactions with an empty `lineItems` array.
    pub empty_line_items: Option<String>,
}

impl AppSettings {
    /// # Errors
    /// Fails when the configured value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// # Errors
    /// Fails when the configured value is not an absolute URL.
    pub fn catalog_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .catalog_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CATALOG_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::CatalogBaseUrl {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog_timeout_ms.unwrap_or(DEFAULT_CATALOG_TIMEOUT_MS))
    }

    /// Reconciler limits derived from the catalog settings.
    pub fn reconciler_config(&self) -> CatalogReconcilerConfig {
        CatalogReconcilerConfig {
            lookup_timeout: self.catalog_timeout(),
            max_attempts: self
                .catalog_max_attempts
                .unwrap_or(DEFAULT_CATALOG_MAX_ATTEMPTS)
                .max(1),
            max_concurrent_lookups: self
                .catalog_max_concurrency
                .unwrap_or(DEFAULT_CATALOG_MAX_CONCURRENCY)
                .max(1),
            ..CatalogReconcilerConfig::default()
        }
    }

    /// # Errors
    /// Fails on values other than `allow` and `reject`.
    pub fn classifier_policy(&self) -> Result<ClassifierPolicy, SettingsError> {
        let empty_line_items = match self.empty_line_items.as_deref() {
            Some(raw) => raw.parse()?,
            None => EmptyLineItemsPolicy::default(),
        };
        Ok(ClassifierPolicy { empty_line_items })
    }
}
