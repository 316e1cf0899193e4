//! Wordweave backend library: account registration and sign-in for a
//! server-rendered blog.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::RequestTrace;
