//! Product registry and external catalog handlers.
//!
//! ```text
//! POST /register-product
//! GET /products
//! GET /products/{skuCode}
//! GET /api/products/{skuCode}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::registry::Product;
use crate::domain::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterProductResponse {
    #[schema(example = "Successfully registered product: denim-jacket")]
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub product: Product,
}

/// Register a product in the local catalog.
#[utoipa::path(
    post,
    path = "/register-product",
    request_body(content = Product, description = "Product registration"),
    responses(
        (status = 200, description = "Product registered", body = RegisterProductResponse),
        (status = 600, description = "Validation failure", body = ErrorBody),
        (status = 950, description = "Undefined field", body = ErrorBody),
        (status = 500, description = "Duplicate or storage failure", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "registerProduct"
)]
#[post("/register-product")]
pub async fn register_product(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<RegisterProductResponse>> {
    let product = state.registry.register_product(&payload).await?;
    Ok(web::Json(RegisterProductResponse {
        message: format!("Successfully registered product: {}", product.name),
        product,
    }))
}

/// List local catalog products.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Products", body = ProductListResponse),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProductListResponse>> {
    let products = state.registry_query.list_products().await?;
    Ok(web::Json(ProductListResponse { products }))
}

/// Fetch one local catalog product.
#[utoipa::path(
    get,
    path = "/products/{skuCode}",
    params(("skuCode" = String, Path, description = "SKU code, 6 to 20 characters")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Unknown product", body = ErrorBody),
        (status = 600, description = "Invalid SKU code", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{sku_code}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    sku_code: web::Path<String>,
) -> ApiResult<web::Json<ProductResponse>> {
    let product = state.registry_query.find_product(&sku_code).await?;
    Ok(web::Json(ProductResponse { product }))
}

/// Pass one SKU lookup through to the external catalog.
///
/// The catalog payload is returned unchanged.
#[utoipa::path(
    get,
    path = "/api/products/{skuCode}",
    params(("skuCode" = String, Path, description = "SKU code, 6 to 20 characters")),
    responses(
        (status = 200, description = "External catalog payload", body = Object),
        (status = 404, description = "Unknown to the external catalog", body = ErrorBody),
        (status = 600, description = "Invalid SKU code", body = ErrorBody),
        (status = 500, description = "Catalog unavailable", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "getCatalogProduct"
)]
#[get("/api/products/{sku_code}")]
pub async fn get_catalog_product(
    state: web::Data<HttpState>,
    sku_code: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let payload = state.registry_query.lookup_catalog_product(&sku_code).await?;
    Ok(web::Json(payload))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
