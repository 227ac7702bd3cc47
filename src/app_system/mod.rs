//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod studio_system;
pub mod tracing;

pub use self::config::*;
pub use self::studio_system::*;
pub use self::tracing::*;
