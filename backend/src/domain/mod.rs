//! Domain primitives, use-cases, and ports.
//!
//! Purpose: define strongly typed entities and the validation pipeline used
//! by the HTTP and persistence adapters. Adapters depend on this module; it
//! depends on none of them.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable error identifier.
//! - MerchantId / UserId / SkuCode: length-checked identifiers.
//! - events: event types, classification, reconciliation, and summaries.
//! - registry: merchant, user, and product records and their service.
//! - ports: driven and driving port traits.

pub mod error;
pub mod events;
pub mod identifiers;
pub mod ports;
pub mod registry;
pub mod trace_id;
pub mod validation;

pub use self::error::{Error, ErrorBody, ErrorCode};
pub use self::identifiers::{IdentifierError, MerchantId, SkuCode, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use merchant_events::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such merchant"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
