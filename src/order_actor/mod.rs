//! Orders table: entity hooks and errors for order records.

pub mod entity;
pub mod error;

pub use error::*;
