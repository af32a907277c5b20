//! Reqwest-backed product catalog adapter.
//!
//! This adapter owns transport details only: URL construction, the merchant
//! header, HTTP error mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::domain::ports::{CatalogSourceError, ProductCatalogSource};
use crate::domain::{MerchantId, SkuCode};

/// Header identifying the calling merchant to the catalog.
pub const MERCHANT_ID_HEADER: &str = "x-hero-merchant-id";

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpProductCatalogSourceError {
    #[error("failed to build catalog HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("merchant id is not a valid header value: {0}")]
    MerchantHeader(#[from] InvalidHeaderValue),
}

/// Catalog source performing `GET {base}/products/{skuCode}`.
pub struct HttpProductCatalogSource {
    client: Client,
    base_url: Url,
}

impl HttpProductCatalogSource {
    /// Build an adapter with a request timeout and the merchant header set on
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the merchant id cannot be sent as a header or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        merchant_id: &MerchantId,
        timeout: Duration,
    ) -> Result<Self, HttpProductCatalogSourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(MERCHANT_ID_HEADER, HeaderValue::from_str(merchant_id.as_str())?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn product_url(&self, sku_code: &SkuCode) -> Result<Url, CatalogSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogSourceError::invalid_request(format!(
                    "catalog base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("products")
            .push(sku_code.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ProductCatalogSource for HttpProductCatalogSource {
    async fn fetch_product(&self, sku_code: &SkuCode) -> Result<Value, CatalogSourceError> {
        let url = self.product_url(sku_code)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(sku_code, status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            CatalogSourceError::decode(format!("invalid catalog JSON payload: {error}"))
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> CatalogSourceError {
    if error.is_timeout() {
        CatalogSourceError::timeout(error.to_string())
    } else {
        CatalogSourceError::transport(error.to_string())
    }
}

fn map_status_error(sku_code: &SkuCode, status: StatusCode, body: &[u8]) -> CatalogSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => CatalogSourceError::not_found(sku_code.as_str()),
        StatusCode::TOO_MANY_REQUESTS => CatalogSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CatalogSourceError::timeout(message)
        }
        _ if status.is_client_error() => CatalogSourceError::invalid_request(message),
        _ => CatalogSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn sku() -> SkuCode {
        SkuCode::new("1234567AC").expect("sku")
    }

    fn source(base: &str) -> HttpProductCatalogSource {
        HttpProductCatalogSource::new(
            Url::parse(base).expect("url"),
            &MerchantId::new("123456789A").expect("merchant"),
            Duration::from_secs(1),
        )
        .expect("client builds")
    }

    #[rstest]
    #[case("https://dev.backend.usehero.com", "https://dev.backend.usehero.com/products/1234567AC")]
    #[case("https://dev.backend.usehero.com/", "https://dev.backend.usehero.com/products/1234567AC")]
    #[case("http://localhost:9000/v2/", "http://localhost:9000/v2/products/1234567AC")]
    fn builds_product_urls(#[case] base: &str, #[case] expected: &str) {
        let url = source(base).product_url(&sku()).expect("url");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn cannot_be_a_base_urls_are_rejected() {
        let error = source("mailto:catalog@example.com")
            .product_url(&sku())
            .expect_err("no path segments");
        assert!(matches!(error, CatalogSourceError::InvalidRequest { .. }));
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "not_found")]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "rate_limited")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "timeout")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "invalid_request")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "transport")]
    fn maps_http_statuses_to_domain_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(&sku(), status, b"{\"error\":\"backend unavailable\"}");
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn not_found_names_the_sku() {
        let error = map_status_error(&sku(), StatusCode::NOT_FOUND, b"");
        assert_eq!(error.to_string(), "catalog product 1234567AC not found");
    }

    #[test]
    fn previews_are_compacted_and_truncated() {
        let body = format!("  {}  ", "x ".repeat(200));
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
        assert!(!preview.contains("  "));
    }

    #[test]
    fn rejects_merchant_ids_that_are_not_header_safe() {
        let merchant = MerchantId::new("merchant\n1").expect("ten characters");
        let result = HttpProductCatalogSource::new(
            Url::parse("https://dev.backend.usehero.com").expect("url"),
            &merchant,
            Duration::from_secs(1),
        );
        assert!(matches!(
            result,
            Err(HttpProductCatalogSourceError::MerchantHeader(_))
        ));
    }
}
