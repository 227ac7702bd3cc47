//! User-facing flows built on the backend clients: the access guard shared by
//! every protected view, order submission, and profile management.

pub mod access_guard;
pub mod notice;
pub mod order_form;
pub mod profile_manager;

pub use access_guard::*;
pub use notice::*;
pub use order_form::*;
pub use profile_manager::*;
