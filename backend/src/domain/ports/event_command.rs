//! Driving port for event submission.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::events::Event;

/// Use-case port for creating events from raw request bodies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCommand: Send + Sync {
    /// Validate, enrich, and persist one event.
    async fn create_event(&self, body: &Value) -> Result<Event, Error>;
}
