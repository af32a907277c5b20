//! In-memory application harness shared by the HTTP integration suites.
//!
//! Every request runs on a fresh Actix system; the repositories live behind
//! `Arc`s so state persists between requests within one test.

use std::sync::Arc;

use actix_web::{App, test, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use serde_json::{Value, json};

use merchant_events::Trace;
use merchant_events::domain::SkuCode;
use merchant_events::domain::events::{
    CatalogReconciler, CatalogReconcilerConfig, ClassifierPolicy, EventService,
};
use merchant_events::domain::ports::{CatalogSourceError, ProductCatalogSource};
use merchant_events::domain::registry::RegistryService;
use merchant_events::inbound::http::configure;
use merchant_events::inbound::http::state::HttpState;
use merchant_events::outbound::memory::{
    InMemoryEventRepository, InMemoryMerchantRepository, InMemoryProductRepository,
    InMemoryUserRepository,
};

/// SKU the stub catalog knows about.
pub(crate) const KNOWN_SKU: &str = "1234567AC";

/// Catalog double that answers for [`KNOWN_SKU`] only.
struct StubCatalog;

#[async_trait]
impl ProductCatalogSource for StubCatalog {
    async fn fetch_product(&self, sku_code: &SkuCode) -> Result<Value, CatalogSourceError> {
        if sku_code.as_str() == KNOWN_SKU {
            Ok(json!({ "sku": KNOWN_SKU, "title": "denim-jacket" }))
        } else {
            Err(CatalogSourceError::not_found(sku_code.as_str()))
        }
    }
}

/// Response captured from one request.
#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub(crate) status: u16,
    pub(crate) body: Value,
    pub(crate) trace_id: Option<String>,
}

/// Application wired to in-memory stores and the stub catalog.
#[derive(Clone)]
pub(crate) struct TestApp {
    state: web::Data<HttpState>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        let catalog: Arc<dyn ProductCatalogSource> = Arc::new(StubCatalog);
        let products = Arc::new(InMemoryProductRepository::default());
        let reconciler = Arc::new(CatalogReconciler::new(
            catalog.clone(),
            products.clone(),
            Arc::new(DefaultClock),
            CatalogReconcilerConfig::default(),
        ));
        let events = Arc::new(EventService::new(
            Arc::new(InMemoryEventRepository::default()),
            reconciler,
            Arc::new(DefaultClock),
            ClassifierPolicy::default(),
        ));
        let registry = Arc::new(RegistryService::new(
            Arc::new(InMemoryMerchantRepository::default()),
            Arc::new(InMemoryUserRepository::default()),
            products,
            catalog,
        ));
        Self {
            state: web::Data::new(HttpState::new(
                events.clone(),
                events,
                registry.clone(),
                registry,
            )),
        }
    }

    pub(crate) fn post(&self, path: &str, payload: &Value) -> Captured {
        self.send(test::TestRequest::post().uri(path).set_json(payload))
    }

    pub(crate) fn post_raw(&self, path: &str, payload: &'static str) -> Captured {
        self.send(
            test::TestRequest::post()
                .uri(path)
                .insert_header(("content-type", "application/json"))
                .set_payload(payload),
        )
    }

    pub(crate) fn get(&self, path: &str) -> Captured {
        self.send(test::TestRequest::get().uri(path))
    }

    fn send(&self, request: test::TestRequest) -> Captured {
        let state = self.state.clone();
        actix_rt::System::new().block_on(async move {
            let app = test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .configure(configure),
            )
            .await;
            let response = test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get("trace-id")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let bytes = test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            Captured {
                status,
                body,
                trace_id,
            }
        })
    }
}
