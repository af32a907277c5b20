//! Tests for event HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::events::{Event, EventPayload, TransactionData, summarize};
use crate::domain::{Error, MerchantId, UserId};
use crate::inbound::http::test_utils::{MockPorts, test_app};

#[fixture]
fn stored_event() -> Event {
    Event {
        id: Uuid::nil(),
        merchant_id: MerchantId::new("123456789A").expect("merchant id"),
        user_id: UserId::new("123456789B").expect("user id"),
        payload: EventPayload::Transaction(TransactionData {
            line_items: Vec::new(),
            total: 30.0,
        }),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).single().expect("time"),
    }
}

#[rstest]
#[actix_web::test]
async fn create_event_returns_the_stored_event(stored_event: Event) {
    let mut ports = MockPorts::default();
    let returned = stored_event.clone();
    ports
        .events
        .expect_create_event()
        .withf(|body| body["type"] == "transaction")
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/create-event")
        .set_json(json!({ "type": "transaction", "merchantID": "123456789A" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Successfully created event");
    assert_eq!(body["event"]["type"], "transaction");
    assert_eq!(body["event"]["merchantID"], "123456789A");
    assert_eq!(body["event"]["data"]["total"], 30.0);
}

#[rstest]
#[case(Error::missing_field("lineItems object must contain quantity"), 950)]
#[case(Error::invalid_request("lineItems.quantity cannot be less than 0"), 600)]
#[case(Error::internal("event store error: disk full"), 500)]
#[actix_web::test]
async fn create_event_maps_domain_errors(#[case] error: Error, #[case] status: u16) {
    let mut ports = MockPorts::default();
    let message = error.message().to_owned();
    ports
        .events
        .expect_create_event()
        .returning(move |_| Err(error.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/create-event")
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), status);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_validation_failure() {
    let mut ports = MockPorts::default();
    ports.events.expect_create_event().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/create-event")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"type\": ")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 600);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn list_events_wraps_in_events_key(stored_event: Event) {
    let mut ports = MockPorts::default();
    ports
        .events_query
        .expect_list_events()
        .returning(move || Ok(vec![stored_event.clone()]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/events").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["events"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn merchant_summary_passes_the_raw_path_id(stored_event: Event) {
    let mut ports = MockPorts::default();
    let summary = summarize(stored_event.merchant_id.clone(), vec![stored_event])
        .expect("summary");
    ports
        .events_query
        .expect_merchant_summary()
        .withf(|merchant_id| merchant_id.to_string() == "123456789A")
        .returning(move |_| Ok(summary.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/events/123456789A")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["merchantID"], "123456789A");
    assert_eq!(body["totalEvents"], 1);
    assert_eq!(body["eventTypes"][0]["totalValue"], 30.0);
}

#[rstest]
#[case("123456789", 600)]
#[case("ZZZZZZZZZZ", 404)]
#[actix_web::test]
async fn merchant_summary_surfaces_lookup_failures(#[case] merchant_id: &str, #[case] status: u16) {
    let mut ports = MockPorts::default();
    ports
        .events_query
        .expect_merchant_summary()
        .returning(|merchant_id| {
            if merchant_id.len() == 10 {
                Err(Error::not_found(format!("no events found for merchant {merchant_id}")))
            } else {
                Err(Error::invalid_request("merchantID must be exactly 10 characters"))
            }
        });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/events/{merchant_id}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), status);
}
