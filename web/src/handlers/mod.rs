//! Handlers shared by every Portico router.

pub mod health;

pub use health::{health_check, method_not_allowed};
