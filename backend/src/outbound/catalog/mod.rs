//! External product catalog adapters.
//!
//! A thin HTTP implementation of the `ProductCatalogSource` port.

mod http_source;

pub use http_source::{HttpProductCatalogSource, HttpProductCatalogSourceError, MERCHANT_ID_HEADER};
