//! Line-item validation for transaction events.

use serde_json::{Map, Value};

use super::LineItem;
use crate::domain::validation::{FieldRule, Rule, rule_violation};
use crate::domain::{Error, SkuCode};

struct FieldCheck {
    field: &'static str,
    missing: &'static str,
    rules: &'static [FieldRule],
}

const LINE_ITEM_CHECKS: &[FieldCheck] = &[
    FieldCheck {
        field: "quantity",
        missing: "lineItems object must contain quantity",
        rules: &[
            FieldRule::new(
                "lineItems.quantity",
                Rule::Number,
                "lineItems.quantity must be a number",
            ),
            FieldRule::new(
                "lineItems.quantity",
                Rule::NonNegativeNumber,
                "lineItems.quantity cannot be less than 0",
            ),
        ],
    },
    FieldCheck {
        field: "price",
        missing: "lineItems object must contain price",
        rules: &[
            FieldRule::new(
                "lineItems.price",
                Rule::Number,
                "lineItems.price must be a number",
            ),
            FieldRule::new(
                "lineItems.price",
                Rule::NonNegativeNumber,
                "lineItems.price cannot be less than 0",
            ),
        ],
    },
    FieldCheck {
        field: "subTotal",
        missing: "lineItems object must contain subTotal",
        rules: &[
            FieldRule::new(
                "lineItems.subTotal",
                Rule::Number,
                "lineItems.subTotal must be a number",
            ),
            FieldRule::new(
                "lineItems.subTotal",
                Rule::NonNegativeNumber,
                "lineItems.subTotal cannot be less than 0",
            ),
        ],
    },
    FieldCheck {
        field: "skuCode",
        missing: "lineItems.skuCode cannot be undefined",
        rules: &[
            FieldRule::new(
                "lineItems.skuCode",
                Rule::String,
                "lineItems.skuCode must be a string",
            ),
            FieldRule::new(
                "lineItems.skuCode",
                Rule::LengthBetween { min: 6, max: 20 },
                "lineItems.skuCode must be between 6 and 20 characters",
            ),
        ],
    },
];

/// Validate a `lineItems` value, returning the typed items in input order.
///
/// Items are checked in index order and fields in the order quantity, price,
/// subTotal, skuCode. The first violation rejects the whole array; messages
/// name the rule but not the item index.
///
/// # Errors
/// Returns an invalid-request error for the first violation found.
pub fn validate_line_items(value: &Value) -> Result<Vec<LineItem>, Error> {
    let entries = value.as_array().ok_or_else(|| {
        rule_violation("lineItems", "not_an_array", "lineItems must be an array")
    })?;
    entries.iter().map(validate_entry).collect()
}

fn validate_entry(entry: &Value) -> Result<LineItem, Error> {
    let object = entry.as_object().ok_or_else(|| {
        rule_violation("lineItems", "not_an_object", "lineItems entries must be objects")
    })?;

    for check in LINE_ITEM_CHECKS {
        let value = object.get(check.field).ok_or_else(|| {
            rule_violation(
                &format!("lineItems.{}", check.field),
                "missing_field",
                check.missing,
            )
        })?;
        check
            .rules
            .iter()
            .try_for_each(|rule| rule.check(Some(value)))?;
    }

    build_line_item(object)
}

fn build_line_item(object: &Map<String, Value>) -> Result<LineItem, Error> {
    let number = |field: &str| object.get(field).and_then(Value::as_f64).unwrap_or_default();
    let sku_code = object
        .get("skuCode")
        .and_then(Value::as_str)
        .map(SkuCode::new)
        .transpose()
        .map_err(|err| rule_violation("lineItems.skuCode", "invalid_length", err.to_string()))?
        .ok_or_else(|| {
            rule_violation(
                "lineItems.skuCode",
                "missing_field",
                "lineItems.skuCode cannot be undefined",
            )
        })?;

    Ok(LineItem {
        sku_code,
        quantity: number("quantity"),
        price: number("price"),
        sub_total: number("subTotal"),
        api_product_info: None,
        catalog_product: None,
    })
}
