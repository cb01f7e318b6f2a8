//! Diesel table definitions.
//!
//! The column names follow the hosted schema, which stores the creation
//! timestamp as `"createdAt"`.

diesel::table! {
    posts (id) {
        id -> Varchar,
        title -> Text,
        content -> Text,
        #[sql_name = "createdAt"]
        created_at -> Text,
    }
}
