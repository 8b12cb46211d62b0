//! External capabilities the research agent depends on.
//!
//! Search, crawling, embeddings and inference are provided by other
//! services. The agent only sees these narrow traits; implementations
//! report failures as boxed errors, which the agent wraps in
//! [`Error::Collaborator`](crate::Error::Collaborator).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CollaboratorError;

/// Result type returned by collaborator implementations.
pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

/// Vector store over the research-data folder.
pub trait Embeddings: Send {
    /// Index (or re-index) the documents in one folder.
    fn index(&mut self, folder: &Path) -> CollaboratorResult<()>;

    /// Context relevant to `query`, drawn from everything indexed so far.
    fn retrieve_context(&self, query: &str) -> CollaboratorResult<String>;
}

/// Language model answering a problem against retrieved context.
pub trait Inferer: Send {
    fn infer(&mut self, context: &str, problem: &str) -> CollaboratorResult<Inference>;
}

/// Web search returning result URLs.
pub trait Search: Send {
    fn search(&self, term: &str) -> CollaboratorResult<Vec<String>>;
}

/// Downloads pages into the research-data folder.
pub trait Crawler: Send {
    /// Fetch every URL in `urls`, writing the documents under `destination`.
    fn crawl(&mut self, urls: &[String], destination: &Path) -> CollaboratorResult<()>;
}

/// Token counts reported by the inferer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt: u64,
    pub completion: u64,
    pub total: u64,
}

impl TokenUsage {
    /// Usage with `total` derived from the two parts.
    pub fn new(prompt: u64, completion: u64) -> Self {
        Self {
            prompt,
            completion,
            total: prompt.saturating_add(completion),
        }
    }
}

/// Output of one inference call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub response: String,
    pub usage: TokenUsage,
}

/// The full set of collaborators handed to a research agent.
pub struct Collaborators {
    pub embeddings: Box<dyn Embeddings>,
    pub inferer: Box<dyn Inferer>,
    pub search: Box<dyn Search>,
    pub crawler: Box<dyn Crawler>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
