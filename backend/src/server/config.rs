//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use merchant_events::domain::MerchantId;
use merchant_events::domain::events::{CatalogReconcilerConfig, ClassifierPolicy};
use merchant_events::outbound::persistence::DbPool;
use reqwest::Url;

/// External catalog connection details.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub(crate) base_url: Url,
    pub(crate) merchant_id: MerchantId,
    pub(crate) timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: Url, merchant_id: MerchantId, timeout: Duration) -> Self {
        Self {
            base_url,
            merchant_id,
            timeout,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalog: CatalogConfig,
    pub(crate) reconciler: CatalogReconcilerConfig,
    pub(crate) policy: ClassifierPolicy,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, catalog: CatalogConfig) -> Self {
        Self {
            bind_addr,
            catalog,
            reconciler: CatalogReconcilerConfig::default(),
            policy: ClassifierPolicy::default(),
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the in-memory stores are used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_reconciler(mut self, reconciler: CatalogReconcilerConfig) -> Self {
        self.reconciler = reconciler;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ClassifierPolicy) -> Self {
        self.policy = policy;
        self
    }
}
