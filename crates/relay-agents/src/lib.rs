//! Agents that speak the relay message protocol.
//!
//! - [`UserAgent`] sits in front of a human. It acknowledges inbound
//!   messages, turns progress reports into a step display written to the
//!   run's progress log, and composes outbound messages in a
//!   recipient-specific persona.
//! - [`ResearchAgent`] trains an embeddings store from web searches and URLs
//!   and answers questions against it. Search, crawling, embeddings and
//!   inference are external collaborators reached through the traits in
//!   [`collaborators`].
//!
//! Both agents handle one message at a time and finish it completely before
//! accepting the next. Construct one [`UserAgent`] per process and pass it
//! by `&mut` to every caller: it exclusively owns the progress log, so the
//! borrow checker rules out interleaved rewrites.

pub mod collaborators;
pub mod compose;
pub mod config;
pub mod error;
pub mod layout;
pub mod persona;
pub mod progress;
pub mod progress_log;
pub mod research;
pub mod steps;
pub mod user;

pub use collaborators::{
    CollaboratorResult, Collaborators, Crawler, Embeddings, Inference, Inferer, Search, TokenUsage,
};
pub use compose::Composer;
pub use config::{ReindexStrategy, ResearchSettings, RunConfig, Settings};
pub use error::{CollaboratorError, Error, Result};
pub use layout::{RunLayout, RunPath};
pub use persona::{Persona, PersonaBook};
pub use progress::{ProgressKind, ProgressTracker, ProgressUpdate, Snapshot, StepStatus};
pub use progress_log::ProgressLog;
pub use research::{RESEARCHER, Reply, ResearchAgent};
pub use steps::{Step, load_steps, number_steps};
pub use user::UserAgent;
