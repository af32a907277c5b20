//! Fixed-shape identifiers shared by events and registry records.
//!
//! Merchant and user identifiers are opaque ten-character strings supplied by
//! callers. SKU codes are catalog keys between six and twenty characters.
//! Lengths are counted in characters, not bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exact length of merchant and user identifiers.
pub const PARTY_ID_LENGTH: usize = 10;
/// Shortest accepted SKU code.
pub const SKU_CODE_MIN: usize = 6;
/// Longest accepted SKU code.
pub const SKU_CODE_MAX: usize = 20;

/// Validation errors raised by identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("merchantID must be exactly 10 characters, got {actual}")]
    MerchantIdLength { actual: usize },
    #[error("userID must be exactly 10 characters, got {actual}")]
    UserIdLength { actual: usize },
    #[error("skuCode must be between 6 and 20 characters, got {actual}")]
    SkuCodeLength { actual: usize },
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier.
            ///
            /// # Errors
            /// Returns [`IdentifierError`] when the length is out of range.
            pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
                let raw = raw.into();
                let check: fn(usize) -> Result<(), IdentifierError> = $check;
                check(raw.chars().count())?;
                Ok(Self(raw))
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_identifier!(
    /// Merchant identifier: exactly ten characters.
    MerchantId,
    |actual| {
        if actual == PARTY_ID_LENGTH {
            Ok(())
        } else {
            Err(IdentifierError::MerchantIdLength { actual })
        }
    }
);

string_identifier!(
    /// User identifier: exactly ten characters.
    UserId,
    |actual| {
        if actual == PARTY_ID_LENGTH {
            Ok(())
        } else {
            Err(IdentifierError::UserIdLength { actual })
        }
    }
);

string_identifier!(
    /// Catalog SKU code: six to twenty characters.
    SkuCode,
    |actual| {
        if (SKU_CODE_MIN..=SKU_CODE_MAX).contains(&actual) {
            Ok(())
        } else {
            Err(IdentifierError::SkuCodeLength { actual })
        }
    }
);
