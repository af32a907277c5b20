//! Driving port for reading persisted events.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::events::{Event, MerchantSummary};

/// Use-case port backing the event listing and summary endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Every persisted event.
    async fn list_events(&self) -> Result<Vec<Event>, Error>;

    /// Aggregate the events of one merchant.
    ///
    /// `merchant_id` is the raw path value; lengths other than ten are
    /// rejected before the store is queried.
    async fn merchant_summary(&self, merchant_id: &str) -> Result<MerchantSummary, Error>;
}
