//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// `hex(salt)$hex(sha256(salt || password))`.
        password_digest -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Calculation records, one row per calculation.
    calculations (id) {
        id -> Uuid,
        /// Owning account; every query filters on it.
        user_id -> Uuid,
        /// Lowercase operation kind.
        operation -> Varchar,
        /// Exactly two operands, in order.
        inputs -> Array<Float8>,
        result -> Float8,
        /// Optimistic concurrency counter, starting at 1.
        revision -> Int4,
        /// Insertion order for listing.
        seq -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(calculations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, calculations);
