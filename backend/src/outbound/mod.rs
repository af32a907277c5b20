//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories used when no database is configured
//! - **catalog**: HTTP client for the external product catalog
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod catalog;
pub mod memory;
pub mod persistence;
