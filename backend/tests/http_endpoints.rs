//! End-to-end HTTP tests over the in-memory stores.

#[path = "support/app.rs"]
mod support;

use support::{KNOWN_SKU, TestApp};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn app() -> TestApp {
    TestApp::new()
}

fn merchant() -> Value {
    json!({
        "name": "Prada",
        "email": "prada@gmail.com",
        "postcode": "BT319ZY",
        "merchantID": "123456789A"
    })
}

fn user(user_id: &str, email: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Kidd",
        "email": email,
        "postcode": "BT319ZY",
        "userID": user_id
    })
}

fn transaction(user_id: &str, sku: &str, total: f64) -> Value {
    json!({
        "type": "transaction",
        "merchantID": "123456789A",
        "userID": user_id,
        "lineItems": [
            { "skuCode": sku, "quantity": 1, "price": total, "subTotal": total }
        ],
        "total": total
    })
}

fn product_view(user_id: &str) -> Value {
    json!({
        "type": "product-view",
        "merchantID": "123456789A",
        "userID": user_id,
        "product": { "skuCode": KNOWN_SKU, "colour": "blue" },
        "location": "Belfast"
    })
}

#[rstest]
fn merchant_registration_round_trips_through_reads(app: TestApp) {
    let created = app.post("/register-merchant", &merchant());
    assert_eq!(created.status, 200);
    assert_eq!(created.body["message"], "Successfully registered merchant: Prada");

    let list = app.get("/merchants");
    assert_eq!(list.body["merchants"].as_array().map(Vec::len), Some(1));

    let single = app.get("/merchants/123456789A");
    assert_eq!(single.status, 200);
    assert_eq!(single.body["merchant"]["email"], "prada@gmail.com");
}

#[rstest]
fn duplicate_merchant_is_a_server_error_naming_the_key(app: TestApp) {
    app.post("/register-merchant", &merchant());

    let again = app.post("/register-merchant", &merchant());

    assert_eq!(again.status, 500);
    assert_eq!(again.body["code"], "internal_error");
    assert_eq!(again.body["message"], "merchant 123456789A already exists");
}

#[rstest]
#[case("name", 950, "missing_field")]
#[case("merchantID", 950, "missing_field")]
fn merchant_missing_fields_use_the_undefined_field_status(
    app: TestApp,
    #[case] field: &str,
    #[case] status: u16,
    #[case] code: &str,
) {
    let mut body = merchant();
    body.as_object_mut().expect("object").remove(field);

    let response = app.post("/register-merchant", &body);

    assert_eq!(response.status, status);
    assert_eq!(response.body["code"], code);
    assert_eq!(response.body["error"], "Undefined field");
}

#[rstest]
fn invalid_merchant_email_is_a_validation_failure(app: TestApp) {
    let mut body = merchant();
    body["email"] = json!("not-an-email");

    let response = app.post("/register-merchant", &body);

    assert_eq!(response.status, 600);
    assert_eq!(response.body["error"], "Validation failure");
    assert!(response.trace_id.is_some());
}

#[rstest]
fn users_are_registered_and_unknown_ids_are_not_found(app: TestApp) {
    let created = app.post("/register-user", &user("123456789B", "ada@example.com"));
    assert_eq!(created.status, 200);
    assert_eq!(created.body["message"], "Successfully registered: Ada Kidd");

    let duplicate_email = app.post("/register-user", &user("123456789C", "ada@example.com"));
    assert_eq!(duplicate_email.status, 500);

    let missing = app.get("/users/ZZZZZZZZZZ");
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["error"], "Not found");
}

#[rstest]
fn registered_products_are_attached_to_line_items(app: TestApp) {
    let product = json!({ "skuCode": KNOWN_SKU, "name": "denim-jacket", "price": 50.0 });
    let created = app.post("/register-product", &product);
    assert_eq!(created.status, 200);
    assert_eq!(
        created.body["message"],
        "Successfully registered product: denim-jacket"
    );

    let event = app.post("/create-event", &transaction("123456789B", KNOWN_SKU, 50.0));

    assert_eq!(event.status, 200);
    let item = &event.body["event"]["data"]["lineItems"][0];
    assert_eq!(item["catalogProduct"]["name"], "denim-jacket");
    assert_eq!(item["apiProductInfo"]["title"], "denim-jacket");
}

#[rstest]
fn summary_aggregates_both_event_types(app: TestApp) {
    for body in [
        transaction("123456789B", KNOWN_SKU, 20.0),
        transaction("123456789C", KNOWN_SKU, 5.5),
        product_view("123456789B"),
    ] {
        assert_eq!(app.post("/create-event", &body).status, 200);
    }

    let summary = app.get("/events/123456789A");

    assert_eq!(summary.status, 200);
    assert_eq!(summary.body["totalEvents"], 3);
    assert_eq!(summary.body["totalCustomers"], 2);
    assert_eq!(summary.body["eventTypes"][0]["type"], "transaction");
    assert_eq!(summary.body["eventTypes"][0]["totalValue"], 25.5);
    assert_eq!(summary.body["eventTypes"][1]["type"], "product-view");
    assert_eq!(summary.body["eventTypes"][1]["customers"], 1);

    let all = app.get("/events");
    assert_eq!(all.body["events"].as_array().map(Vec::len), Some(3));
}

#[rstest]
fn product_view_keeps_extra_product_attributes(app: TestApp) {
    let created = app.post("/create-event", &product_view("123456789B"));

    assert_eq!(created.status, 200);
    assert_eq!(created.body["event"]["type"], "product-view");
    assert_eq!(created.body["event"]["data"]["product"]["colour"], "blue");
}

#[rstest]
fn malformed_json_is_a_validation_failure(app: TestApp) {
    let response = app.post_raw("/create-event", "{\"type\": ");

    assert_eq!(response.status, 600);
    assert_eq!(response.body["code"], "invalid_request");
}

#[rstest]
#[case(KNOWN_SKU, 200)]
#[case("UNKNOWN01", 404)]
#[case("123", 600)]
fn catalog_passthrough_reflects_the_external_answer(
    app: TestApp,
    #[case] sku: &str,
    #[case] status: u16,
) {
    let response = app.get(&format!("/api/products/{sku}"));

    assert_eq!(response.status, status, "{}", response.body);
    if status == 200 {
        assert_eq!(response.body["sku"], KNOWN_SKU);
    }
}
