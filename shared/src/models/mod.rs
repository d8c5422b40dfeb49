//! Wire models for the inventory backend
//!
//! Field names on the wire are the backend's (French, camelCase foreign keys,
//! capitalised association names). Rust fields use English snake_case.

mod auth;
mod category;
mod dashboard;
mod product;
mod purchase;
mod sale;
mod stock_movement;
mod supplier;
mod user;

pub use auth::*;
pub use category::*;
pub use dashboard::*;
pub use product::*;
pub use purchase::*;
pub use sale::*;
pub use stock_movement::*;
pub use supplier::*;
pub use user::*;
