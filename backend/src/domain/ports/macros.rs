//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` derives `thiserror::Error` for the enum and emits one
//! snake_case constructor per variant. Constructor parameters accept
//! `impl Into<T>` so adapters can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerPortError {
            Unavailable => "ledger unavailable",
            Rejected { reason: String } => "ledger rejected entry: {reason}",
            Conflict { sku_code: String, attempts: u8 } =>
                "ledger conflict on {sku_code} after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::unavailable(), LedgerPortError::Unavailable);
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        let err = LedgerPortError::rejected("duplicate");
        assert_eq!(err.to_string(), "ledger rejected entry: duplicate");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = LedgerPortError::conflict("1234567AC", 3_u8);
        assert_eq!(
            err.to_string(),
            "ledger conflict on 1234567AC after 3 attempts"
        );
    }
}
