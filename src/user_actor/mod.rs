//! Actor that owns the user store and serves requests one at a time.

mod service;

pub use service::*;
