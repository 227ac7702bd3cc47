//! Order pricing: the product/turnaround vocabulary, the injectable pricing
//! table, and the engine every order submission goes through.

mod catalog;
mod engine;
mod error;
mod table;

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use table::*;
