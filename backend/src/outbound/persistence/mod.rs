//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between row structs and domain types. Row
//! structs (`models`) and table definitions (`schema`) stay private to this
//! module. Connections come from a `bb8` pool over `diesel-async`.

mod diesel_role_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
