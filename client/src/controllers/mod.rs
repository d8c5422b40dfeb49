//! Page controllers of the Stock Admin console

pub mod basket;
pub mod dashboard;
pub mod list;
pub mod lookups;

pub use basket::BasketController;
pub use dashboard::DashboardController;
pub use list::{ListController, ReloadOutcome};
pub use lookups::{Lookup, LookupSet};
