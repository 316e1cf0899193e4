//! Profile picture storage adapters.

mod local;

pub use local::{LocalProfileImageStore, PUBLIC_IMAGE_PREFIX};
