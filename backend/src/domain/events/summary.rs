//! Per-merchant event aggregation.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Event, EventKind};
use crate::domain::{MerchantId, UserId};

/// Counts for one event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeSummary {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub count: usize,
    /// Distinct users with at least one event of this type.
    pub customers: usize,
    /// Sum of transaction totals; absent for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
}

/// Aggregated view of one merchant's events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MerchantSummary {
    #[serde(rename = "merchantID")]
    #[schema(value_type = String, example = "123456789A")]
    pub merchant_id: MerchantId,
    pub total_events: usize,
    /// Distinct users across all event types.
    pub total_customers: usize,
    /// Breakdown with transactions first; types without events are omitted.
    pub event_types: Vec<EventTypeSummary>,
    pub events: Vec<Event>,
}

#[derive(Default)]
struct Tally<'a> {
    count: usize,
    customers: HashSet<&'a UserId>,
    total: f64,
}

/// Summarize `events` for `merchant_id`; `None` when there are no events.
///
/// Events attributed to other merchants are ignored.
#[must_use]
pub fn summarize(merchant_id: MerchantId, events: Vec<Event>) -> Option<MerchantSummary> {
    let events: Vec<Event> = events
        .into_iter()
        .filter(|event| event.merchant_id == merchant_id)
        .collect();
    if events.is_empty() {
        return None;
    }

    let (total_customers, event_types) = {
        let mut customers: HashSet<&UserId> = HashSet::new();
        let mut tallies: BTreeMap<EventKind, Tally<'_>> = BTreeMap::new();
        for event in &events {
            customers.insert(&event.user_id);
            let tally = tallies.entry(event.kind()).or_default();
            tally.count += 1;
            tally.customers.insert(&event.user_id);
            tally.total += event.payload.value();
        }

        let event_types: Vec<EventTypeSummary> = EventKind::ALL
            .into_iter()
            .filter_map(|kind| {
                tallies.get(&kind).map(|tally| EventTypeSummary {
                    kind,
                    count: tally.count,
                    customers: tally.customers.len(),
                    total_value: (kind == EventKind::Transaction).then_some(tally.total),
                })
            })
            .collect();
        (customers.len(), event_types)
    };

    Some(MerchantSummary {
        merchant_id,
        total_events: events.len(),
        total_customers,
        event_types,
        events,
    })
}
