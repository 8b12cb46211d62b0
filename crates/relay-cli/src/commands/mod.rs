//! Command implementations for relay-cli

pub mod actions;
pub mod compose;
pub mod user;

pub use actions::{run_actions, run_sample};
pub use compose::run_compose;
pub use user::{UserSummary, run_user};
