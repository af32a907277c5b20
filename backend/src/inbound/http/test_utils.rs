//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockEventCommand, MockEventQuery, MockRegistryCommand, MockRegistryQuery,
};
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; unset expectations fail the test if called.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub events: MockEventCommand,
    pub events_query: MockEventQuery,
    pub registry: MockRegistryCommand,
    pub registry_query: MockRegistryQuery,
}

impl MockPorts {
    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.events),
            Arc::new(self.events_query),
            Arc::new(self.registry),
            Arc::new(self.registry_query),
        )
    }
}

/// Application with every endpoint mounted over the given mocks.
pub(crate) fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(Trace)
        .configure(super::configure)
}
