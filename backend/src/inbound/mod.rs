//! Inbound adapters translating HTTP requests into domain calls.
//!
//! Framework details stay here; handlers depend on the driving ports in
//! [`crate::domain::ports`] through [`http::state::HttpState`].

pub mod http;
