//! Merchant registry handlers.
//!
//! ```text
//! POST /register-merchant
//! GET /merchants
//! GET /merchants/{merchantID}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::registry::Merchant;
use crate::domain::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterMerchantResponse {
    #[schema(example = "Successfully registered merchant: Prada")]
    pub message: String,
    pub merchant: Merchant,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchantListResponse {
    pub merchants: Vec<Merchant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MerchantResponse {
    pub merchant: Merchant,
}

/// Register a merchant.
#[utoipa::path(
    post,
    path = "/register-merchant",
    request_body(content = Merchant, description = "Merchant registration"),
    responses(
        (status = 200, description = "Merchant registered", body = RegisterMerchantResponse),
        (status = 600, description = "Validation failure", body = ErrorBody),
        (status = 950, description = "Undefined field", body = ErrorBody),
        (status = 500, description = "Duplicate or storage failure", body = ErrorBody)
    ),
    tags = ["merchants"],
    operation_id = "registerMerchant"
)]
#[post("/register-merchant")]
pub async fn register_merchant(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<RegisterMerchantResponse>> {
    let merchant = state.registry.register_merchant(&payload).await?;
    Ok(web::Json(RegisterMerchantResponse {
        message: format!("Successfully registered merchant: {}", merchant.name),
        merchant,
    }))
}

/// List registered merchants.
#[utoipa::path(
    get,
    path = "/merchants",
    responses(
        (status = 200, description = "Merchants", body = MerchantListResponse),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["merchants"],
    operation_id = "listMerchants"
)]
#[get("/merchants")]
pub async fn list_merchants(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<MerchantListResponse>> {
    let merchants = state.registry_query.list_merchants().await?;
    Ok(web::Json(MerchantListResponse { merchants }))
}

/// Fetch one merchant.
#[utoipa::path(
    get,
    path = "/merchants/{merchantID}",
    params(("merchantID" = String, Path, description = "Ten-character merchant id")),
    responses(
        (status = 200, description = "Merchant", body = MerchantResponse),
        (status = 404, description = "Unknown merchant", body = ErrorBody),
        (status = 600, description = "Invalid merchant id", body = ErrorBody)
    ),
    tags = ["merchants"],
    operation_id = "getMerchant"
)]
#[get("/merchants/{merchant_id}")]
pub async fn get_merchant(
    state: web::Data<HttpState>,
    merchant_id: web::Path<String>,
) -> ApiResult<web::Json<MerchantResponse>> {
    let merchant = state.registry_query.find_merchant(&merchant_id).await?;
    Ok(web::Json(MerchantResponse { merchant }))
}

#[cfg(test)]
#[path = "merchants_tests.rs"]
mod tests;
