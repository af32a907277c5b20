//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use merchant_events::domain::registry::RegistryService;
use merchant_events::domain::events::{CatalogReconciler, EventService};
use merchant_events::domain::ports::{
    EventRepository, MerchantRepository, ProductCatalogSource, ProductRepository, UserRepository,
};
use merchant_events::inbound::http::state::HttpState;
use merchant_events::outbound::catalog::HttpProductCatalogSource;
use merchant_events::outbound::memory::{
    InMemoryEventRepository, InMemoryMerchantRepository, InMemoryProductRepository,
    InMemoryUserRepository,
};
use merchant_events::outbound::persistence::{
    DbPool, DieselEventRepository, DieselMerchantRepository, DieselProductRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Driven ports shared by the event and registry services.
struct Repositories {
    events: Arc<dyn EventRepository>,
    merchants: Arc<dyn MerchantRepository>,
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
}

impl Repositories {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            events: Arc::new(DieselEventRepository::new(pool.clone())),
            merchants: Arc::new(DieselMerchantRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            products: Arc::new(DieselProductRepository::new(pool.clone())),
        }
    }

    fn in_memory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepository::default()),
            merchants: Arc::new(InMemoryMerchantRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
            products: Arc::new(InMemoryProductRepository::default()),
        }
    }
}

/// Build the HTTP state from configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the catalog client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let repositories = match &config.db_pool {
        Some(pool) => Repositories::diesel(pool),
        None => {
            info!("no database configured; using in-memory stores");
            Repositories::in_memory()
        }
    };

    let catalog: Arc<dyn ProductCatalogSource> = Arc::new(
        HttpProductCatalogSource::new(
            config.catalog.base_url.clone(),
            &config.catalog.merchant_id,
            config.catalog.timeout,
        )
        .map_err(|err| std::io::Error::other(err.to_string()))?,
    );

    let reconciler = Arc::new(CatalogReconciler::new(
        catalog.clone(),
        repositories.products.clone(),
        Arc::new(DefaultClock),
        config.reconciler.clone(),
    ));
    let events = Arc::new(EventService::new(
        repositories.events,
        reconciler,
        Arc::new(DefaultClock),
        config.policy,
    ));
    let registry = Arc::new(RegistryService::new(
        repositories.merchants,
        repositories.users,
        repositories.products,
        catalog,
    ));

    Ok(HttpState::new(
        events.clone(),
        events,
        registry.clone(),
        registry,
    ))
}
