//! Profiles table: entity hooks and errors for profile records.

pub mod entity;
pub mod error;

pub use error::*;
