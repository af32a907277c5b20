//! Event classification and type dispatch.
//!
//! `classify` checks the fields every event carries, then routes the body to
//! the transaction or product-view branch based on `type`. The first
//! violation short-circuits the whole event.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value, json};

use super::{EventKind, EventPayload, ProductViewData, TransactionData, ValidatedEvent};
use super::line_items::validate_line_items;
use crate::domain::validation::{
    FieldRule, Rule, apply_rules, expect_object, require_fields, rule_violation,
};
use crate::domain::{Error, MerchantId, UserId};

const EVENT_FIELDS: &[&str] = &["type", "merchantID", "userID"];

const EVENT_RULES: &[FieldRule] = &[
    FieldRule::new("type", Rule::String, "type must be a string"),
    FieldRule::new("merchantID", Rule::String, "merchantID must be a string"),
    FieldRule::new(
        "merchantID",
        Rule::exact_length(10),
        "merchantID must be 10 characters long",
    ),
    FieldRule::new("userID", Rule::String, "userID must be a string"),
    FieldRule::new(
        "userID",
        Rule::exact_length(10),
        "userID must be 10 characters long",
    ),
];

const TRANSACTION_FIELDS: &[&str] = &["lineItems", "total"];

const TOTAL_RULES: &[FieldRule] = &[
    FieldRule::new("total", Rule::Number, "total must be a number"),
    FieldRule::new(
        "total",
        Rule::NonNegativeNumber,
        "total cannot be less than 0",
    ),
];

const PRODUCT_VIEW_FIELDS: &[&str] = &["product", "location"];

const PRODUCT_VIEW_RULES: &[FieldRule] = &[
    FieldRule::new(
        "product",
        Rule::NonEmptyObject,
        "product must be a non-empty object",
    ),
    FieldRule::new("location", Rule::String, "location must be a string"),
    FieldRule::new(
        "location",
        Rule::MinLength(6),
        "location must be at least 6 characters long",
    ),
];

const VIEWED_PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::new(
        "product.skuCode",
        Rule::String,
        "product.skuCode must be a string",
    ),
    FieldRule::new(
        "product.skuCode",
        Rule::LengthBetween { min: 6, max: 20 },
        "product.skuCode must be between 6 and 20 characters",
    ),
];

/// What to do with a transaction whose `lineItems` array is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyLineItemsPolicy {
    /// Accept and persist the transaction.
    #[default]
    Allow,
    /// Reject with a validation error.
    Reject,
}

impl EmptyLineItemsPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for EmptyLineItemsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown empty-line-items policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown empty line items policy `{0}`; expected allow or reject")]
pub struct ParseEmptyLineItemsPolicyError(String);

impl FromStr for EmptyLineItemsPolicy {
    type Err = ParseEmptyLineItemsPolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(ParseEmptyLineItemsPolicyError(other.to_owned())),
        }
    }
}

/// Tunables applied while classifying events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierPolicy {
    pub empty_line_items: EmptyLineItemsPolicy,
}

/// Validate an incoming event body and resolve its typed payload.
///
/// The type-specific payload is read from `data` when it is an object and
/// from the top-level body otherwise.
///
/// # Errors
/// - `MissingField` when a required field is absent.
/// - `InvalidRequest` for type, format, or range violations, and for
///   unsupported event types.
pub fn classify(body: &Value, policy: &ClassifierPolicy) -> Result<ValidatedEvent, Error> {
    let object = expect_object(body, "event")?;
    require_fields(object, EVENT_FIELDS)?;
    apply_rules(object, EVENT_RULES)?;

    let raw_type = string_field(object, "type");
    let kind = EventKind::parse(raw_type).ok_or_else(|| unsupported_type(raw_type))?;
    let merchant_id = MerchantId::new(string_field(object, "merchantID"))
        .map_err(|err| rule_violation("merchantID", "invalid_length", err.to_string()))?;
    let user_id = UserId::new(string_field(object, "userID"))
        .map_err(|err| rule_violation("userID", "invalid_length", err.to_string()))?;

    let source = match object.get("data") {
        Some(Value::Object(data)) => data,
        _ => object,
    };
    let payload = match kind {
        EventKind::Transaction => classify_transaction(source, policy)?,
        EventKind::ProductView => classify_product_view(source)?,
    };

    Ok(ValidatedEvent {
        merchant_id,
        user_id,
        payload,
    })
}

fn classify_transaction(
    source: &Map<String, Value>,
    policy: &ClassifierPolicy,
) -> Result<EventPayload, Error> {
    require_fields(source, TRANSACTION_FIELDS)?;
    let line_items = validate_line_items(source.get("lineItems").unwrap_or(&Value::Null))?;
    if line_items.is_empty() && policy.empty_line_items == EmptyLineItemsPolicy::Reject {
        return Err(rule_violation(
            "lineItems",
            "empty_line_items",
            "lineItems cannot be empty",
        ));
    }
    apply_rules(source, TOTAL_RULES)?;
    let total = source
        .get("total")
        .and_then(Value::as_f64)
        .unwrap_or_default();

    Ok(EventPayload::Transaction(TransactionData { line_items, total }))
}

fn classify_product_view(source: &Map<String, Value>) -> Result<EventPayload, Error> {
    require_fields(source, PRODUCT_VIEW_FIELDS)?;
    apply_rules(source, PRODUCT_VIEW_RULES)?;

    let product = source
        .get("product")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let sku = product.get("skuCode").ok_or_else(|| {
        rule_violation(
            "product.skuCode",
            "missing_field",
            "product.skuCode cannot be undefined",
        )
    })?;
    VIEWED_PRODUCT_RULES
        .iter()
        .try_for_each(|rule| rule.check(Some(sku)))?;

    let data = json!({ "product": product, "location": source.get("location") });
    serde_json::from_value::<ProductViewData>(data)
        .map(EventPayload::ProductView)
        .map_err(|err| Error::invalid_request(format!("invalid product-view event: {err}")))
}

fn string_field<'a>(object: &'a Map<String, Value>, field: &str) -> &'a str {
    object.get(field).and_then(Value::as_str).unwrap_or_default()
}

fn unsupported_type(raw: &str) -> Error {
    rule_violation(
        "type",
        "unsupported_event_type",
        format!("unsupported event type: {raw}; expected transaction or product-view"),
    )
}
