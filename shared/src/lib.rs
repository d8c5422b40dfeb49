//! Shared types, models and view logic for the Stock Admin console
//!
//! This crate contains the wire contracts of the inventory backend and the
//! pure, I/O-free logic shared by the client library and the browser (via WASM):
//! searchable paginated list views, the line-item basket used to assemble
//! purchases and sales, and the session-gated navigation rule.

pub mod basket;
pub mod list_view;
pub mod models;
pub mod session;
pub mod types;
pub mod validation;

pub use basket::*;
pub use list_view::*;
pub use models::*;
pub use session::*;
pub use types::*;
pub use validation::*;
