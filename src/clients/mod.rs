//! Typed handles for the backend collaborators: the profiles and orders
//! tables and the identity provider.

#[macro_use]
mod macros;

pub mod auth_client;
pub mod order_client;
pub mod profile_client;

pub use auth_client::AuthClient;
pub use order_client::OrderClient;
pub use profile_client::ProfileClient;
