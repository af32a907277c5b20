//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories and the external catalog) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod event_command;
mod event_query;
mod event_repository;
mod merchant_repository;
mod product_catalog_source;
mod product_repository;
mod registry_command;
mod registry_query;
mod registry_repository_error;
mod user_repository;

#[cfg(test)]
pub use event_command::MockEventCommand;
pub use event_command::EventCommand;
#[cfg(test)]
pub use event_query::MockEventQuery;
pub use event_query::EventQuery;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use merchant_repository::MockMerchantRepository;
pub use merchant_repository::MerchantRepository;
#[cfg(test)]
pub use product_catalog_source::MockProductCatalogSource;
pub use product_catalog_source::{
    CatalogSourceError, FixtureProductCatalogSource, ProductCatalogSource,
};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::ProductRepository;
#[cfg(test)]
pub use registry_command::MockRegistryCommand;
pub use registry_command::RegistryCommand;
#[cfg(test)]
pub use registry_query::MockRegistryQuery;
pub use registry_query::RegistryQuery;
pub use registry_repository_error::RegistryRepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
