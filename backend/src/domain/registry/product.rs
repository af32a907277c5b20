//! Local catalog entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::validation::{FieldRule, Rule, apply_rules, expect_object, require_fields};
use crate::domain::{Error, SkuCode};

const PRODUCT_FIELDS: &[&str] = &["skuCode", "price", "name"];

const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::new("skuCode", Rule::String, "SKU code must be a string"),
    FieldRule::new("price", Rule::Number, "Price must be a number"),
    FieldRule::new(
        "price",
        Rule::NonNegativeNumber,
        "Price cannot be a negative number",
    ),
    FieldRule::new("name", Rule::String, "Name must be a string"),
    FieldRule::new(
        "skuCode",
        Rule::LengthBetween { min: 6, max: 20 },
        "skuCode must be between 6 and 20 characters",
    ),
    FieldRule::new(
        "name",
        Rule::LengthBetween { min: 4, max: 100 },
        "product name must be between 4 and 100 characters",
    ),
];

/// A product registered in the local catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique SKU code.
    #[schema(value_type = String, example = "1234567AC")]
    pub sku_code: SkuCode,
    /// Unit list price.
    #[schema(example = 50.0)]
    pub price: f64,
    #[schema(example = "denim-jacket")]
    pub name: String,
}

impl Product {
    /// Validate a registration body.
    ///
    /// # Errors
    /// Missing fields yield `MissingField`; other violations yield
    /// `InvalidRequest`.
    pub fn from_registration(body: &Value) -> Result<Self, Error> {
        let object = expect_object(body, "product registration")?;
        require_fields(object, PRODUCT_FIELDS)?;
        apply_rules(object, PRODUCT_RULES)?;
        serde_json::from_value(body.clone())
            .map_err(|err| Error::invalid_request(format!("invalid product registration: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ErrorCode;

    #[test]
    fn accepts_valid_registration() {
        let body = json!({ "skuCode": "1234567AC", "name": "denim-jacket", "price": 50.0 });
        let product = Product::from_registration(&body).expect("valid product");
        assert_eq!(product.sku_code.as_str(), "1234567AC");
        assert!((product.price - 50.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(json!({ "name": "blue-tie", "price": 5.0 }), ErrorCode::MissingField, "skuCode was not found in request")]
    #[case(json!({ "skuCode": 12345678, "name": "blue-tie", "price": 5.0 }), ErrorCode::InvalidRequest, "SKU code must be a string")]
    #[case(json!({ "skuCode": "12345NHAB", "name": "blue-tie", "price": "5" }), ErrorCode::InvalidRequest, "Price must be a number")]
    #[case(json!({ "skuCode": "12345NHAB", "name": "blue-tie", "price": -1 }), ErrorCode::InvalidRequest, "Price cannot be a negative number")]
    #[case(json!({ "skuCode": "12345", "name": "blue-tie", "price": 5.0 }), ErrorCode::InvalidRequest, "skuCode must be between 6 and 20 characters")]
    #[case(json!({ "skuCode": "12345NHAB", "name": "tie", "price": 5.0 }), ErrorCode::InvalidRequest, "product name must be between 4 and 100 characters")]
    fn rejects_invalid_registrations(
        #[case] body: Value,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let err = Product::from_registration(&body).expect_err("invalid product");
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
    }
}
