//! Event HTTP handlers.
//!
//! ```text
//! POST /create-event
//! GET /events
//! GET /events/{merchantID}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ApiResult;
use crate::domain::ErrorBody;
use crate::domain::events::{Event, MerchantSummary};
use crate::inbound::http::state::HttpState;

/// Response for a stored event.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateEventResponse {
    #[schema(example = "Successfully created event")]
    pub message: String,
    pub event: Event,
}

/// Every stored event.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

/// Validate, enrich, and store one event.
///
/// The body is taken as raw JSON so validation can report the first missing
/// or malformed field in order.
#[utoipa::path(
    post,
    path = "/create-event",
    request_body(content = Object, description = "Transaction or product-view event"),
    responses(
        (status = 200, description = "Event stored", body = CreateEventResponse),
        (status = 600, description = "Validation failure", body = ErrorBody),
        (status = 950, description = "Undefined field", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/create-event")]
pub async fn create_event(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<CreateEventResponse>> {
    let event = state.events.create_event(&payload).await?;
    Ok(web::Json(CreateEventResponse {
        message: "Successfully created event".to_owned(),
        event,
    }))
}

/// List every stored event in insertion order.
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Events", body = EventListResponse),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(state: web::Data<HttpState>) -> ApiResult<web::Json<EventListResponse>> {
    let events = state.events_query.list_events().await?;
    Ok(web::Json(EventListResponse { events }))
}

/// Summarise one merchant's events.
#[utoipa::path(
    get,
    path = "/events/{merchantID}",
    params(("merchantID" = String, Path, description = "Ten-character merchant id")),
    responses(
        (status = 200, description = "Merchant summary", body = MerchantSummary),
        (status = 404, description = "No events for the merchant", body = ErrorBody),
        (status = 600, description = "Invalid merchant id", body = ErrorBody),
        (status = 500, description = "Server error", body = ErrorBody)
    ),
    tags = ["events"],
    operation_id = "merchantSummary"
)]
#[get("/events/{merchant_id}")]
pub async fn merchant_summary(
    state: web::Data<HttpState>,
    merchant_id: web::Path<String>,
) -> ApiResult<web::Json<MerchantSummary>> {
    let summary = state.events_query.merchant_summary(&merchant_id).await?;
    Ok(web::Json(summary))
}

#[cfg(test)]
mod tests;
