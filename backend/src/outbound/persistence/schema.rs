//! Diesel table definitions for the PostgreSQL schema.
//!
//! Tables are provisioned outside this service. Keep these definitions in
//! step with the deployed DDL; `diesel print-schema` regenerates them from a
//! live database.

diesel::table! {
    /// Append-only event log.
    events (seq) {
        /// Insertion order (`BIGSERIAL`).
        seq -> Int8,
        /// Server-assigned UUID v4; unique.
        id -> Uuid,
        /// `transaction` or `product-view`.
        kind -> Varchar,
        merchant_id -> Varchar,
        user_id -> Varchar,
        /// Type-specific payload.
        data -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered merchants. `email` carries a unique index.
    merchants (merchant_id) {
        merchant_id -> Varchar,
        name -> Varchar,
        email -> Varchar,
        postcode -> Varchar,
    }
}

diesel::table! {
    /// Registered shoppers. `email` carries a unique index.
    users (user_id) {
        user_id -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        postcode -> Varchar,
    }
}

diesel::table! {
    /// Local product catalog.
    products (sku_code) {
        sku_code -> Varchar,
        name -> Varchar,
        price -> Float8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(events, merchants, users, products);
