//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Seeded account roles (`admin`, `user`).
    roles (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Registered accounts. `username` carries the `users_username_key`
    /// unique constraint.
    users (id) {
        id -> Uuid,
        full_name -> Varchar,
        email -> Varchar,
        username -> Varchar,
        password_hash -> Text,
        role_id -> Int4,
        profile_picture -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog post categories.
    categories (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::joinable!(users -> roles (role_id));

diesel::allow_tables_to_appear_in_same_query!(categories, roles, users);
