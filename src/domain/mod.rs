pub mod profile;
pub mod order;
pub mod session;

pub use profile::*;
pub use order::*;
pub use session::*;
