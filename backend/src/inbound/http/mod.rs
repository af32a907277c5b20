//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers take raw JSON bodies and delegate to the driving ports held in
//! [`state::HttpState`]; domain errors become responses in [`error`].

use actix_web::web;

pub mod error;
pub mod events;
pub mod health;
pub mod merchants;
pub mod products;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

/// JSON extractor configuration rejecting malformed bodies as validation
/// failures.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register every event and registry endpoint.
///
/// Health probes and API docs are mounted by the server.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use merchant_events::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(events::create_event)
        .service(events::list_events)
        .service(events::merchant_summary)
        .service(merchants::register_merchant)
        .service(merchants::list_merchants)
        .service(merchants::get_merchant)
        .service(products::register_product)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::get_catalog_product)
        .service(users::register_user)
        .service(users::list_users)
        .service(users::get_user);
}
