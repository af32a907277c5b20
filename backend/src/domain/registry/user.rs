//! Shopper directory record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::validation::{FieldRule, Rule, apply_rules, expect_object, require_fields};
use crate::domain::{Error, UserId};

const USER_FIELDS: &[&str] = &["firstName", "lastName", "email", "postcode", "userID"];

const USER_RULES: &[FieldRule] = &[
    FieldRule::new("firstName", Rule::String, "firstName must be a string"),
    FieldRule::new("lastName", Rule::String, "lastName must be a string"),
    FieldRule::new("email", Rule::String, "email must be a string"),
    FieldRule::new("postcode", Rule::String, "postcode must be a string"),
    FieldRule::new("userID", Rule::String, "userID must be a string"),
    FieldRule::new(
        "firstName",
        Rule::LengthBetween { min: 2, max: 50 },
        "First name must be between 2 and 50 characters long",
    ),
    FieldRule::new(
        "lastName",
        Rule::LengthBetween { min: 2, max: 50 },
        "Last name must be between 2 and 50 characters long",
    ),
    FieldRule::new("email", Rule::Email, "Invalid email"),
    FieldRule::new(
        "postcode",
        Rule::exact_length(7),
        "Post code must be seven characters long",
    ),
    FieldRule::new(
        "userID",
        Rule::exact_length(10),
        "userID must be 10 characters long",
    ),
];

/// A registered shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Ten-character user identifier.
    #[serde(rename = "userID")]
    #[schema(value_type = String, example = "123456789A")]
    pub user_id: UserId,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Kidd")]
    pub last_name: String,
    /// Contact email; unique across users.
    pub email: String,
    pub postcode: String,
}

impl User {
    /// Validate a registration body.
    ///
    /// # Errors
    /// Missing fields yield `MissingField`; other violations yield
    /// `InvalidRequest`.
    pub fn from_registration(body: &Value) -> Result<Self, Error> {
        let object = expect_object(body, "user registration")?;
        require_fields(object, USER_FIELDS)?;
        apply_rules(object, USER_RULES)?;
        serde_json::from_value(body.clone())
            .map_err(|err| Error::invalid_request(format!("invalid user registration: {err}")))
    }

    /// Full name used in confirmation messages.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ErrorCode;

    fn valid_body() -> Value {
        json!({
            "firstName": "ABC",
            "lastName": "Kidd",
            "email": "testuser953@gmail.com",
            "postcode": "BT319Y4",
            "userID": "123456789A",
        })
    }

    #[test]
    fn accepts_valid_registration() {
        let user = User::from_registration(&valid_body()).expect("valid user");
        assert_eq!(user.full_name(), "ABC Kidd");
        assert_eq!(user.user_id.as_str(), "123456789A");
    }

    #[test]
    fn reports_first_missing_field_in_schema_order() {
        let body = json!({ "firstName": "ABC", "postcode": "BT319Y4" });
        let err = User::from_registration(&body).expect_err("missing");
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.message(), "lastName was not found in request");
    }

    #[rstest]
    #[case("firstName", json!(false), "firstName must be a string")]
    #[case("lastName", json!("K"), "Last name must be between 2 and 50 characters long")]
    #[case("userID", json!("123456789AB"), "userID must be 10 characters long")]
    #[case("email", json!("kidd@"), "Invalid email")]
    fn invalid_values_are_rejected(#[case] field: &str, #[case] value: Value, #[case] message: &str) {
        let mut body = valid_body();
        body[field] = value;
        let err = User::from_registration(&body).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }
}
