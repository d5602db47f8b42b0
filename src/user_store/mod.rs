//! The user directory: masked reads, id generation and partial updates over
//! a whole-table storage backend.

pub mod error;
mod store;

pub use error::*;
pub use store::*;
