//! Shared test utilities for the relay workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`run`]: [`TestRun`] builder for a temporary workspace with one run
//! - [`fakes`]: recording fake collaborators for the research agent

pub mod fakes;
pub mod run;

pub use fakes::{FakeCollaborators, Record};
pub use run::TestRun;
