//! Catalog reconciliation for transaction line items.
//!
//! Every line item triggers one external catalog lookup. Lookups run
//! concurrently under a semaphore, each bounded by a timeout, and are joined
//! before results are merged back by index. A failed lookup never fails the
//! event: the item is kept unenriched and the failure is logged and counted.
//! Distinct SKUs are also matched against the local product repository.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{join, join_all};
use mockable::Clock;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::LineItem;
use crate::domain::SkuCode;
use crate::domain::ports::{CatalogSourceError, ProductCatalogSource, ProductRepository};
use crate::domain::registry::Product;

mod retry;

use retry::backoff_delay;
pub use retry::{AttemptJitter, BackoffJitter, LookupSleeper, ReconcilerRuntime, TokioSleeper};

/// Limits applied to external catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReconcilerConfig {
    /// Upper bound on a single lookup attempt.
    pub lookup_timeout: Duration,
    /// Attempts per lookup, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Retry delay cap.
    pub max_backoff: Duration,
    /// Lookups allowed in flight at once across all requests.
    pub max_concurrent_lookups: usize,
}

impl Default for CatalogReconcilerConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(2),
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            max_concurrent_lookups: 8,
        }
    }
}

/// Counts describing how a batch of line items was reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Line items submitted.
    pub requested: usize,
    /// Items enriched with an external payload.
    pub enriched: usize,
    /// Items the external catalog does not know.
    pub not_found: usize,
    /// Items whose lookup failed after retries.
    pub failed: usize,
    /// Retries issued across all lookups.
    pub retries: u32,
    /// Items matched in the local product repository.
    pub local_matches: usize,
}

impl ReconciliationReport {
    /// Whether every lookup produced a definitive answer.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug)]
enum LookupOutcome {
    Enriched { payload: Value, attempts: u32 },
    NotFound { attempts: u32 },
    Failed { attempts: u32 },
}

impl LookupOutcome {
    const fn attempts(&self) -> u32 {
        match self {
            Self::Enriched { attempts, .. }
            | Self::NotFound { attempts }
            | Self::Failed { attempts } => *attempts,
        }
    }
}

/// Keys under which catalog payloads may name their SKU.
const PAYLOAD_SKU_KEYS: [&str; 2] = ["sku", "skuCode"];

/// Accept only JSON objects describing `sku_code`.
///
/// Payloads without a SKU key are accepted as-is.
fn check_payload(sku_code: &SkuCode, payload: &Value) -> Result<(), &'static str> {
    let Value::Object(fields) = payload else {
        return Err("payload is not a JSON object");
    };
    let mismatched = PAYLOAD_SKU_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .any(|named| named.as_str() != Some(sku_code.as_str()));
    if mismatched {
        return Err("payload describes a different SKU");
    }
    Ok(())
}

/// Enriches line items from the external and local catalogs.
pub struct CatalogReconciler {
    source: Arc<dyn ProductCatalogSource>,
    products: Arc<dyn ProductRepository>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn LookupSleeper>,
    jitter: Arc<dyn BackoffJitter>,
    lookup_semaphore: Arc<Semaphore>,
    config: CatalogReconcilerConfig,
}

impl CatalogReconciler {
    /// Build a reconciler using the tokio sleeper and clock-seeded jitter.
    pub fn new(
        source: Arc<dyn ProductCatalogSource>,
        products: Arc<dyn ProductRepository>,
        clock: Arc<dyn Clock>,
        config: CatalogReconcilerConfig,
    ) -> Self {
        Self::with_runtime(source, products, clock, ReconcilerRuntime::default(), config)
    }

    /// Build a reconciler with injected retry helpers.
    pub fn with_runtime(
        source: Arc<dyn ProductCatalogSource>,
        products: Arc<dyn ProductRepository>,
        clock: Arc<dyn Clock>,
        runtime: ReconcilerRuntime,
        config: CatalogReconcilerConfig,
    ) -> Self {
        Self {
            source,
            products,
            clock,
            sleeper: runtime.sleeper,
            jitter: runtime.jitter,
            lookup_semaphore: Arc::new(Semaphore::new(config.max_concurrent_lookups.max(1))),
            config,
        }
    }

    /// Enrich `items`, preserving their order.
    ///
    /// Returns only after every lookup has settled.
    pub async fn reconcile(&self, items: Vec<LineItem>) -> (Vec<LineItem>, ReconciliationReport) {
        let mut report = ReconciliationReport {
            requested: items.len(),
            ..ReconciliationReport::default()
        };
        if items.is_empty() {
            return (items, report);
        }

        let external = join_all(items.iter().map(|item| self.lookup_external(&item.sku_code)));
        let (outcomes, local) = join(external, self.lookup_local(&items)).await;

        let reconciled = items
            .into_iter()
            .zip(outcomes)
            .map(|(mut item, outcome)| {
                report.retries += outcome.attempts().saturating_sub(1);
                match outcome {
                    LookupOutcome::Enriched { payload, .. } => {
                        report.enriched += 1;
                        item.api_product_info = Some(payload);
                    }
                    LookupOutcome::NotFound { .. } => report.not_found += 1,
                    LookupOutcome::Failed { .. } => report.failed += 1,
                }
                item.catalog_product = local.get(&item.sku_code).cloned();
                if item.catalog_product.is_some() {
                    report.local_matches += 1;
                }
                item
            })
            .collect();

        debug!(
            requested = report.requested,
            enriched = report.enriched,
            not_found = report.not_found,
            failed = report.failed,
            retries = report.retries,
            local_matches = report.local_matches,
            "line items reconciled"
        );
        (reconciled, report)
    }

    async fn lookup_external(&self, sku_code: &SkuCode) -> LookupOutcome {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt_lookup(sku_code).await {
                Ok(payload) => {
                    if let Err(reason) = check_payload(sku_code, &payload) {
                        warn!(
                            sku_code = %sku_code,
                            reason,
                            "catalog payload rejected; line item left unenriched"
                        );
                        return LookupOutcome::NotFound { attempts: attempt };
                    }
                    return LookupOutcome::Enriched {
                        payload,
                        attempts: attempt,
                    };
                }
                Err(CatalogSourceError::NotFound { .. }) => {
                    return LookupOutcome::NotFound { attempts: attempt };
                }
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let base = backoff_delay(
                        self.config.initial_backoff,
                        self.config.max_backoff,
                        attempt,
                    );
                    let delay = self.jitter.jittered_delay(base, attempt, self.clock.utc());
                    debug!(
                        sku_code = %sku_code,
                        attempt,
                        kind = error.kind(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "retrying catalog lookup"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    warn!(
                        sku_code = %sku_code,
                        attempts = attempt,
                        kind = error.kind(),
                        error = %error,
                        "catalog lookup failed; line item left unenriched"
                    );
                    return LookupOutcome::Failed { attempts: attempt };
                }
            }
        }
    }

    async fn attempt_lookup(&self, sku_code: &SkuCode) -> Result<Value, CatalogSourceError> {
        let _permit = self
            .lookup_semaphore
            .acquire()
            .await
            .map_err(|_| CatalogSourceError::transport("catalog lookup semaphore closed"))?;

        tokio::time::timeout(self.config.lookup_timeout, self.source.fetch_product(sku_code))
            .await
            .unwrap_or_else(|_| {
                Err(CatalogSourceError::timeout(format!(
                    "no response within {}ms",
                    self.config.lookup_timeout.as_millis()
                )))
            })
    }

    async fn lookup_local(&self, items: &[LineItem]) -> HashMap<SkuCode, Product> {
        let distinct: BTreeSet<&SkuCode> = items.iter().map(|item| &item.sku_code).collect();
        let lookups = distinct.into_iter().map(|sku_code| async move {
            match self.products.find_by_sku(sku_code).await {
                Ok(found) => found.map(|product| (sku_code.clone(), product)),
                Err(error) => {
                    warn!(
                        sku_code = %sku_code,
                        error = %error,
                        "local catalog lookup failed"
                    );
                    None
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }
}
