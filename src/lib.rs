//! # Print order studio
//!
//! Order intake for a photo/print service. Clients submit print jobs through
//! a form, the price comes from one injectable pricing table, and profiles
//! are read and updated against the backend.
//!
//! ## Layout
//!
//! - **Domain** - plain records: [`domain::Order`], [`domain::Profile`], [`domain::Session`]
//! - **Pricing** - vocabulary, table and engine → [`pricing::PricingEngine`]
//! - **Backend** - tables as [`actor_framework::ResourceActor`]s and the identity
//!   provider as [`auth_actor::AuthService`], reached through typed [`clients`]
//! - **Flows** - [`flows::AccessGuard`], [`flows::OrderForm`], [`flows::ProfileManager`]
//! - **System** - wiring, config and tracing → [`app_system::StudioSystem`]

pub mod actor_framework;
pub mod app_system;
pub mod auth_actor;
pub mod clients;
pub mod domain;
pub mod flows;
pub mod messages;
pub mod order_actor;
pub mod pricing;
pub mod profile_actor;

#[cfg(test)]
mod mock_framework;
