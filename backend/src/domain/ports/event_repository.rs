//! Driven port for the append-only event store.

use async_trait::async_trait;

use crate::domain::MerchantId;
use crate::domain::events::Event;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by event store adapters.
    pub enum EventRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "event store connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "event store query failed: {message}",
    }
}

/// Append-only storage for validated events.
///
/// Adapters never mutate or delete stored events. Identical submissions are
/// stored as separate events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist one event.
    async fn append(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Every stored event in insertion order.
    async fn list_all(&self) -> Result<Vec<Event>, EventRepositoryError>;

    /// Stored events attributed to `merchant_id`, in insertion order.
    async fn list_for_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Event>, EventRepositoryError>;
}
