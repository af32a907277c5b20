//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the event and registry repository ports,
//! backed by `diesel-async` with `bb8` connection pooling. Row structs and
//! table definitions stay private to this module; adapters only translate
//! between rows and domain types.
//!
//! ```ignore
//! use merchant_events::outbound::persistence::{DbPool, DieselEventRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/events")).await?;
//! let events = DieselEventRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_event_repository;
mod diesel_merchant_repository;
mod diesel_product_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_merchant_repository::DieselMerchantRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
