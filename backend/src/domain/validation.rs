//! Single-field validators shared by every request schema.
//!
//! Validators are pure predicates over `serde_json::Value`. Callers declare
//! their checks as an ordered list of [`FieldRule`]s and stop at the first
//! violation. Presence is checked separately by [`require_fields`], which
//! reports only the first absent field in schema order.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::Error;

/// A single predicate applied to one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value is a JSON string.
    String,
    /// Value is a JSON number.
    Number,
    /// Value is a JSON number greater than or equal to zero.
    NonNegativeNumber,
    /// Value is a JSON array.
    Array,
    /// Value is a JSON object with at least one key.
    NonEmptyObject,
    /// Value is a string whose character count lies in `min..=max`.
    LengthBetween { min: usize, max: usize },
    /// Value is a string of at least `min` characters.
    MinLength(usize),
    /// Value is a string shaped like an email address.
    Email,
}

impl Rule {
    /// Exactly `len` characters.
    #[must_use]
    pub const fn exact_length(len: usize) -> Self {
        Self::LengthBetween { min: len, max: len }
    }

    /// Evaluate the predicate.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => is_string(value),
            Self::Number => is_number(value),
            Self::NonNegativeNumber => is_non_negative_number(value),
            Self::Array => is_array(value),
            Self::NonEmptyObject => value.as_object().is_some_and(|map| !map.is_empty()),
            Self::LengthBetween { min, max } => value
                .as_str()
                .is_some_and(|text| length_between(text, min, max)),
            Self::MinLength(min) => value
                .as_str()
                .is_some_and(|text| text.chars().count() >= min),
            Self::Email => value.as_str().is_some_and(is_email),
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::String => "not_a_string",
            Self::Number => "not_a_number",
            Self::NonNegativeNumber => "negative_number",
            Self::Array => "not_an_array",
            Self::NonEmptyObject => "not_an_object",
            Self::LengthBetween { .. } | Self::MinLength(_) => "invalid_length",
            Self::Email => "invalid_email",
        }
    }
}

/// A rule bound to a field name and the message reported on violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    field: &'static str,
    rule: Rule,
    message: &'static str,
}

impl FieldRule {
    /// Declare a rule for `field`.
    #[must_use]
    pub const fn new(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }

    /// Validate one value; an absent value always violates the rule.
    ///
    /// # Errors
    /// Returns [`ErrorCode::InvalidRequest`](super::ErrorCode::InvalidRequest)
    /// carrying this rule's message.
    pub fn check(&self, value: Option<&Value>) -> Result<(), Error> {
        match value {
            Some(value) if self.rule.accepts(value) => Ok(()),
            _ => Err(rule_violation(self.field, self.rule.code(), self.message)),
        }
    }
}

/// Apply `rules` in declaration order against fields of `object`, stopping at
/// the first violation.
///
/// # Errors
/// Returns the first violated rule as an invalid-request error.
pub fn apply_rules(object: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), Error> {
    rules
        .iter()
        .try_for_each(|rule| rule.check(object.get(rule.field)))
}

/// Name of the first field in `schema` that is absent from `object`.
#[must_use]
pub fn first_missing_field<'a>(object: &Map<String, Value>, schema: &[&'a str]) -> Option<&'a str> {
    schema
        .iter()
        .copied()
        .find(|field| !object.contains_key(*field))
}

/// Fail with a missing-field error naming the first absent field.
///
/// # Errors
/// Returns [`ErrorCode::MissingField`](super::ErrorCode::MissingField).
pub fn require_fields(object: &Map<String, Value>, schema: &[&str]) -> Result<(), Error> {
    match first_missing_field(object, schema) {
        Some(field) => Err(missing_field_error(field)),
        None => Ok(()),
    }
}

/// Interpret a request body as a JSON object.
///
/// # Errors
/// Returns an invalid-request error when the body is not an object.
pub fn expect_object<'a>(body: &'a Value, what: &str) -> Result<&'a Map<String, Value>, Error> {
    body.as_object().ok_or_else(|| {
        Error::invalid_request(format!("{what} must be a JSON object"))
            .with_details(json!({ "code": "not_an_object" }))
    })
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::missing_field(format!("{field} was not found in request"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

pub(crate) fn rule_violation(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// `isString`.
#[must_use]
pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// `isNumber`.
#[must_use]
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// `isNonNegativeNumber`.
#[must_use]
pub fn is_non_negative_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|number| number >= 0.0)
}

/// `isArray`.
#[must_use]
pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// `lengthBetween(min, max)`, counted in characters.
#[must_use]
pub fn length_between(text: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&text.chars().count())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Loose email shape check: one `@`, a dotted domain, no whitespace.
#[must_use]
pub fn is_email(text: &str) -> bool {
    email_regex().is_match(text)
}
