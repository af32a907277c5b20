//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EventCommand, EventQuery, RegistryCommand, RegistryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub events: Arc<dyn EventCommand>,
    pub events_query: Arc<dyn EventQuery>,
    pub registry: Arc<dyn RegistryCommand>,
    pub registry_query: Arc<dyn RegistryQuery>,
}

impl HttpState {
    pub fn new(
        events: Arc<dyn EventCommand>,
        events_query: Arc<dyn EventQuery>,
        registry: Arc<dyn RegistryCommand>,
        registry_query: Arc<dyn RegistryQuery>,
    ) -> Self {
        Self {
            events,
            events_query,
            registry,
            registry_query,
        }
    }
}
