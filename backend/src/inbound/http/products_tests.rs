//! Tests for product and external catalog handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::registry::Product;
use crate::domain::{Error, SkuCode};
use crate::inbound::http::test_utils::{MockPorts, test_app};

fn denim_jacket() -> Product {
    Product {
        sku_code: SkuCode::new("1234567AC").expect("sku"),
        price: 50.0,
        name: "denim-jacket".to_owned(),
    }
}

#[rstest]
#[actix_web::test]
async fn register_product_names_the_product() {
    let mut ports = MockPorts::default();
    ports
        .registry
        .expect_register_product()
        .returning(|_| Ok(denim_jacket()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register-product")
        .set_json(json!({ "skuCode": "1234567AC", "price": 50, "name": "denim-jacket" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Successfully registered product: denim-jacket");
    assert_eq!(body["product"]["skuCode"], "1234567AC");
}

#[rstest]
#[actix_web::test]
async fn missing_product_fields_use_the_undefined_field_status() {
    let mut ports = MockPorts::default();
    ports
        .registry
        .expect_register_product()
        .returning(|_| Err(Error::missing_field("price is required")));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register-product")
        .set_json(json!({ "skuCode": "1234567AC" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 950);
}

#[rstest]
#[actix_web::test]
async fn get_product_wraps_in_product_key() {
    let mut ports = MockPorts::default();
    ports
        .registry_query
        .expect_find_product()
        .withf(|sku| sku.to_string() == "1234567AC")
        .returning(|_| Ok(denim_jacket()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/products/1234567AC")
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["product"]["price"], 50.0);
}

#[rstest]
#[actix_web::test]
async fn catalog_passthrough_returns_payload_unchanged() {
    let mut ports = MockPorts::default();
    ports
        .registry_query
        .expect_lookup_catalog_product()
        .returning(|_| Ok(json!({ "sku": "1234567AC", "title": "Denim jacket" })));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/products/1234567AC")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "sku": "1234567AC", "title": "Denim jacket" }));
}

#[rstest]
#[case(Error::not_found("catalog product UNKNOWN01 not found"), 404)]
#[case(Error::internal("catalog transport failed: connection refused"), 500)]
#[actix_web::test]
async fn catalog_passthrough_maps_failures(#[case] error: Error, #[case] status: u16) {
    let mut ports = MockPorts::default();
    ports
        .registry_query
        .expect_lookup_catalog_product()
        .returning(move |_| Err(error.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/products/UNKNOWN01")
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), status);
}
