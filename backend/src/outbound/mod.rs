//! Outbound adapters implementing the domain ports.
//!
//! - `persistence`: PostgreSQL repositories over Diesel.
//! - `memory`: in-process user store for database-less runs.
//! - `password`: Argon2id password hashing.
//! - `images`: local filesystem profile picture storage.

pub mod images;
pub mod memory;
pub mod password;
pub mod persistence;
