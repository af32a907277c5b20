//! Tests for merchant registry handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::registry::Merchant;
use crate::domain::{Error, MerchantId};
use crate::inbound::http::test_utils::{MockPorts, test_app};

#[fixture]
fn merchant() -> Merchant {
    Merchant {
        merchant_id: MerchantId::new("123456789A").expect("merchant id"),
        name: "Prada".to_owned(),
        email: "prada@gmail.com".to_owned(),
        postcode: "BT319ZY".to_owned(),
    }
}

#[rstest]
#[actix_web::test]
async fn register_merchant_names_the_merchant(merchant: Merchant) {
    let mut ports = MockPorts::default();
    ports
        .registry
        .expect_register_merchant()
        .times(1)
        .returning(move |_| Ok(merchant.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register-merchant")
        .set_json(json!({
            "name": "Prada",
            "email": "prada@gmail.com",
            "postcode": "BT319ZY",
            "merchantID": "123456789A"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Successfully registered merchant: Prada");
    assert_eq!(body["merchant"]["merchantID"], "123456789A");
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_a_server_error() {
    let mut ports = MockPorts::default();
    ports
        .registry
        .expect_register_merchant()
        .returning(|_| Err(Error::internal("merchant 123456789A already exists")));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register-merchant")
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "merchant 123456789A already exists");
}

#[rstest]
#[actix_web::test]
async fn list_and_get_use_entity_keys(merchant: Merchant) {
    let mut ports = MockPorts::default();
    let listed = merchant.clone();
    ports
        .registry_query
        .expect_list_merchants()
        .returning(move || Ok(vec![listed.clone()]));
    ports
        .registry_query
        .expect_find_merchant()
        .returning(move |_| Ok(merchant.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let list = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/merchants").to_request(),
    )
    .await;
    let list: Value = actix_test::read_body_json(list).await;
    assert_eq!(list["merchants"][0]["name"], "Prada");

    let single = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/merchants/123456789A")
            .to_request(),
    )
    .await;
    let single: Value = actix_test::read_body_json(single).await;
    assert_eq!(single["merchant"]["email"], "prada@gmail.com");
}

#[rstest]
#[case(Error::invalid_request("merchantID must be exactly 10 characters"), 600)]
#[case(Error::not_found("merchant ZZZZZZZZZZ not found"), 404)]
#[actix_web::test]
async fn get_merchant_maps_lookup_errors(#[case] error: Error, #[case] status: u16) {
    let mut ports = MockPorts::default();
    ports
        .registry_query
        .expect_find_merchant()
        .returning(move |_| Err(error.clone()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/merchants/ZZZZZZZZZZ")
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), status);
}
