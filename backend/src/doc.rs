//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint together with the domain schemas
//! they exchange. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::events::{
    Event, EventKind, EventPayload, EventTypeSummary, LineItem, MerchantSummary,
    ProductViewData, TransactionData, ViewedProduct,
};
use crate::domain::registry::{Merchant, Product, User};
use crate::domain::{ErrorBody, ErrorCode};
use crate::inbound::http::events::{CreateEventResponse, EventListResponse};
use crate::inbound::http::merchants::{
    MerchantListResponse, MerchantResponse, RegisterMerchantResponse,
};
use crate::inbound::http::products::{
    ProductListResponse, ProductResponse, RegisterProductResponse,
};
use crate::inbound::http::users::{RegisterUserResponse, UserListResponse, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Merchant events API",
        description = "Registry of merchants, users, and products with validated \
                       transaction and product-view events."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::merchant_summary,
        crate::inbound::http::merchants::register_merchant,
        crate::inbound::http::merchants::list_merchants,
        crate::inbound::http::merchants::get_merchant,
        crate::inbound::http::products::register_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::get_catalog_product,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorBody,
        ErrorCode,
        Event,
        EventKind,
        EventPayload,
        LineItem,
        TransactionData,
        ProductViewData,
        ViewedProduct,
        EventTypeSummary,
        MerchantSummary,
        Merchant,
        User,
        Product,
        CreateEventResponse,
        EventListResponse,
        RegisterMerchantResponse,
        MerchantListResponse,
        MerchantResponse,
        RegisterProductResponse,
        ProductListResponse,
        ProductResponse,
        RegisterUserResponse,
        UserListResponse,
        UserResponse,
    )),
    tags(
        (name = "events", description = "Event submission and merchant summaries"),
        (name = "merchants", description = "Merchant registry"),
        (name = "products", description = "Local catalog and external catalog passthrough"),
        (name = "users", description = "Shopper registry"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
