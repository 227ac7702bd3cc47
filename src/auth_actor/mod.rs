//! Identity provider: session lookup and email-change requests.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
