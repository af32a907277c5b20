//! Event use-cases: submission and per-merchant reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::classifier::{ClassifierPolicy, classify};
use super::reconciler::CatalogReconciler;
use super::summary::{MerchantSummary, summarize};
use super::{Event, EventPayload};
use crate::domain::ports::{EventCommand, EventQuery, EventRepository, EventRepositoryError};
use crate::domain::validation::rule_violation;
use crate::domain::{Error, MerchantId};

fn map_repository_error(error: EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::internal(format!("event store unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event store error: {message}"))
        }
    }
}

/// Service implementing the event driving ports.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    reconciler: Arc<CatalogReconciler>,
    clock: Arc<dyn Clock>,
    policy: ClassifierPolicy,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        reconciler: Arc<CatalogReconciler>,
        clock: Arc<dyn Clock>,
        policy: ClassifierPolicy,
    ) -> Self {
        Self {
            events,
            reconciler,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl EventCommand for EventService {
    async fn create_event(&self, body: &Value) -> Result<Event, Error> {
        let mut validated = classify(body, &self.policy)?;

        if let EventPayload::Transaction(data) = &mut validated.payload {
            let items = std::mem::take(&mut data.line_items);
            let (items, report) = self.reconciler.reconcile(items).await;
            if !report.is_complete() {
                warn!(
                    merchant_id = %validated.merchant_id,
                    failed = report.failed,
                    requested = report.requested,
                    "transaction stored with partially enriched line items"
                );
            }
            data.line_items = items;
        }

        let event = Event::record(validated, Uuid::new_v4(), self.clock.utc());
        self.events
            .append(&event)
            .await
            .map_err(map_repository_error)?;

        info!(
            event_id = %event.id,
            kind = event.kind().as_str(),
            merchant_id = %event.merchant_id,
            "event recorded"
        );
        Ok(event)
    }
}

#[async_trait]
impl EventQuery for EventService {
    async fn list_events(&self) -> Result<Vec<Event>, Error> {
        self.events.list_all().await.map_err(map_repository_error)
    }

    async fn merchant_summary(&self, merchant_id: &str) -> Result<MerchantSummary, Error> {
        let merchant_id = MerchantId::new(merchant_id)
            .map_err(|err| rule_violation("merchantID", "invalid_length", err.to_string()))?;
        let events = self
            .events
            .list_for_merchant(&merchant_id)
            .await
            .map_err(map_repository_error)?;
        let not_found = format!("no events found for merchant {merchant_id}");
        summarize(merchant_id, events).ok_or_else(|| Error::not_found(not_found))
    }
}
