//! Purchase and product-view events.
//!
//! An incoming event passes through the [`classifier`], which checks the
//! top-level fields and dispatches on the declared type. Transaction line
//! items are validated by [`line_items`] and then enriched by the
//! [`reconciler`]. The [`service`] chains these steps and persists the
//! result; [`summary`] aggregates persisted events per merchant.

pub mod classifier;
pub mod line_items;
pub mod reconciler;
pub mod service;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::registry::Product;
use crate::domain::{MerchantId, SkuCode, UserId};

pub use classifier::{ClassifierPolicy, EmptyLineItemsPolicy, classify};
pub use line_items::validate_line_items;
pub use reconciler::{CatalogReconciler, CatalogReconcilerConfig, ReconciliationReport};
pub use service::EventService;
pub use summary::{EventTypeSummary, MerchantSummary, summarize};

/// Supported event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Transaction,
    ProductView,
}

impl EventKind {
    /// Every kind, in summary order.
    pub const ALL: [Self; 2] = [Self::Transaction, Self::ProductView];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::ProductView => "product-view",
        }
    }

    /// Parse a wire name; unknown names yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// One purchased entry within a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[schema(value_type = String, example = "1234567AC")]
    pub sku_code: SkuCode,
    pub quantity: f64,
    pub price: f64,
    /// Caller-supplied subtotal; stored as given.
    pub sub_total: f64,
    /// External catalog payload, present when the lookup succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub api_product_info: Option<Value>,
    /// Local catalog entry for the SKU, when registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_product: Option<Product>,
}

/// Payload of a `transaction` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub line_items: Vec<LineItem>,
    pub total: f64,
}

/// Product reference carried by a `product-view` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewedProduct {
    #[schema(value_type = String, example = "1234567AC")]
    pub sku_code: SkuCode,
    /// Any further attributes the client sent alongside the SKU.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
}

/// Payload of a `product-view` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductViewData {
    pub product: ViewedProduct,
    #[schema(example = "Belfast")]
    pub location: String,
}

/// Type-tagged event payload, serialised as `{"type": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum EventPayload {
    Transaction(TransactionData),
    ProductView(ProductViewData),
}

impl EventPayload {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Transaction(_) => EventKind::Transaction,
            Self::ProductView(_) => EventKind::ProductView,
        }
    }

    /// Monetary value contributed to summaries; zero for product views.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Transaction(data) => data.total,
            Self::ProductView(_) => 0.0,
        }
    }

    /// Serialise the inner data object for storage.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn data_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Transaction(data) => serde_json::to_value(data),
            Self::ProductView(data) => serde_json::to_value(data),
        }
    }

    /// Rebuild a payload from its stored kind and data object.
    ///
    /// # Errors
    /// Fails when `data` does not match the shape for `kind`.
    pub fn from_parts(kind: EventKind, data: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EventKind::Transaction => Self::Transaction(serde_json::from_value(data)?),
            EventKind::ProductView => Self::ProductView(serde_json::from_value(data)?),
        })
    }
}

/// A validated event before the server assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub merchant_id: MerchantId,
    pub user_id: UserId,
    pub payload: EventPayload,
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    #[serde(rename = "merchantID")]
    #[schema(value_type = String, example = "123456789A")]
    pub merchant_id: MerchantId,
    #[serde(rename = "userID")]
    #[schema(value_type = String, example = "123456789B")]
    pub user_id: UserId,
    #[serde(flatten)]
    pub payload: EventPayload,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Stamp a validated event with its identity and creation time.
    #[must_use]
    pub fn record(validated: ValidatedEvent, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            merchant_id: validated.merchant_id,
            user_id: validated.user_id,
            payload: validated.payload,
            created_at,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}
