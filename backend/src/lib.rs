//! Merchant event registry library modules.
//!
//! The crate follows a ports-and-adapters layout: `domain` owns validation,
//! reconciliation, and aggregation; `inbound` exposes HTTP handlers; and
//! `outbound` provides persistence and external catalog adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

#[cfg(test)]
mod test_support;
