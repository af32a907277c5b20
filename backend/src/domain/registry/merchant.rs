//! Merchant directory record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::validation::{FieldRule, Rule, apply_rules, expect_object, require_fields};
use crate::domain::{Error, MerchantId};

const MERCHANT_FIELDS: &[&str] = &["name", "email", "postcode", "merchantID"];

const MERCHANT_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::String, "Name must be a string"),
    FieldRule::new("email", Rule::String, "Email must be a string"),
    FieldRule::new("postcode", Rule::String, "Postcode must be a string"),
    FieldRule::new("merchantID", Rule::String, "MerchantID must be a string"),
    FieldRule::new(
        "name",
        Rule::LengthBetween { min: 2, max: 50 },
        "Merchant name must be between 2 and 50 characters long",
    ),
    FieldRule::new("email", Rule::Email, "Invalid email"),
    // Post codes are stored in the seven-character UK outward+inward form.
    FieldRule::new(
        "postcode",
        Rule::exact_length(7),
        "Post code must be seven characters long",
    ),
    FieldRule::new(
        "merchantID",
        Rule::exact_length(10),
        "merchantID must be 10 characters long",
    ),
];

/// A registered merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Ten-character merchant identifier.
    #[serde(rename = "merchantID")]
    #[schema(value_type = String, example = "123456789A")]
    pub merchant_id: MerchantId,
    /// Trading name.
    #[schema(example = "Prada")]
    pub name: String,
    /// Contact email; unique across merchants.
    #[schema(example = "prada@gmail.com")]
    pub email: String,
    /// Seven-character post code.
    #[schema(example = "BT319ZY")]
    pub postcode: String,
}

impl Merchant {
    /// Validate a registration body.
    ///
    /// # Errors
    /// Missing fields yield `MissingField`; type and format violations yield
    /// `InvalidRequest`.
    pub fn from_registration(body: &Value) -> Result<Self, Error> {
        let object = expect_object(body, "merchant registration")?;
        require_fields(object, MERCHANT_FIELDS)?;
        apply_rules(object, MERCHANT_RULES)?;
        serde_json::from_value(body.clone())
            .map_err(|err| Error::invalid_request(format!("invalid merchant registration: {err}")))
    }
}
