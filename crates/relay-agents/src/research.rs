//! The research agent: trains an embeddings store and answers against it.

use relay_messages::{Action, Field, Message, Template, parse};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::collaborators::{Collaborators, TokenUsage};
use crate::config::{ReindexStrategy, RunConfig, Settings};
use crate::{Error, Result};

/// Sender name on every researcher reply.
pub const RESEARCHER: &str = "RESEARCHER";

const SEARCH_TRAINED: &str = "Training using search term completed successfully";
const URL_TRAINED: &str = "Training using url completed successfully";

/// An outbound message plus the token usage of the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub usage: Option<TokenUsage>,
}

/// Dispatches `train-using-search-term`, `train-using-url` and `infer`.
///
/// After every training request the whole research-data folder is walked
/// and each subfolder is submitted to the embeddings store, so the store
/// always reflects the full tree. [`ReindexStrategy::Incremental`] skips
/// subfolders this agent has already submitted.
#[derive(Debug)]
pub struct ResearchAgent {
    research_dir: PathBuf,
    reindex: ReindexStrategy,
    collaborators: Collaborators,
    indexed: HashSet<PathBuf>,
}

impl ResearchAgent {
    pub fn new(config: &RunConfig, settings: &Settings, collaborators: Collaborators) -> Self {
        let research_dir = config.layout().research_dir();
        tracing::info!(
            research_dir = %research_dir.display(),
            reindex = ?settings.research.reindex,
            "Research agent ready"
        );
        Self {
            research_dir,
            reindex: settings.research.reindex,
            collaborators,
            indexed: HashSet::new(),
        }
    }

    /// Build from `RELAY_WORKSPACE`, `RELAY_RUN_ID` and the workspace settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when either variable is unset and
    /// [`Error::Settings`] when the settings file cannot be parsed.
    pub fn from_env(collaborators: Collaborators) -> Result<Self> {
        let config = RunConfig::from_env()?;
        let settings = Settings::for_layout(&config.layout())?;
        Ok(Self::new(&config, &settings, collaborators))
    }

    pub fn research_dir(&self) -> &Path {
        &self.research_dir
    }

    /// Handle one inbound message.
    ///
    /// # Errors
    ///
    /// - Malformed text, unknown actions and actions other than the three
    ///   researcher actions
    /// - Collaborator failures and I/O errors while walking the research folder
    pub fn handle(&mut self, raw: &str) -> Result<Reply> {
        let message = parse(raw)?;
        let action = message.action()?;
        let reply_to = message.sender().unwrap_or_default();

        match action {
            Action::TrainUsingSearchTerm => {
                let term = message.field(Field::Term).unwrap_or_default();
                tracing::info!(term, "Training using search term");
                let urls = self
                    .collaborators
                    .search
                    .search(term)
                    .map_err(|e| Error::collaborator("search", e))?;
                self.train(&urls)?;
                reply(Action::TrainingOutput, reply_to, SEARCH_TRAINED, None)
            }
            Action::TrainUsingUrl => {
                let url = message.field(Field::Url).unwrap_or_default();
                tracing::info!(url, "Training using url");
                self.train(&[url.to_string()])?;
                reply(Action::TrainingOutput, reply_to, URL_TRAINED, None)
            }
            Action::Infer => {
                let problem = message.details().unwrap_or_default();
                tracing::info!(problem, "Inferring");
                let context = self
                    .collaborators
                    .embeddings
                    .retrieve_context(problem)
                    .map_err(|e| Error::collaborator("embeddings", e))?;
                let inference = self
                    .collaborators
                    .inferer
                    .infer(&context, problem)
                    .map_err(|e| Error::collaborator("inferer", e))?;
                tracing::info!(total_tokens = inference.usage.total, "Inference complete");
                reply(
                    Action::Response,
                    reply_to,
                    &inference.response,
                    Some(inference.usage),
                )
            }
            other => Err(relay_messages::Error::UnknownAction(other.to_string()).into()),
        }
    }

    fn train(&mut self, urls: &[String]) -> Result<()> {
        std::fs::create_dir_all(&self.research_dir)
            .map_err(|e| Error::io(&self.research_dir, e))?;

        tracing::info!(count = urls.len(), "Crawling urls");
        self.collaborators
            .crawler
            .crawl(urls, &self.research_dir)
            .map_err(|e| Error::collaborator("crawler", e))?;

        self.reindex()
    }

    /// Submit every subfolder of the research folder to the embeddings store.
    fn reindex(&mut self) -> Result<()> {
        tracing::info!(research_dir = %self.research_dir.display(), "Re-indexing research folder");

        for folder in subfolders(&self.research_dir)? {
            if self.reindex == ReindexStrategy::Incremental && self.indexed.contains(&folder) {
                tracing::debug!(folder = %folder.display(), "Already indexed, skipping");
                continue;
            }

            tracing::info!(folder = %folder.display(), "Indexing folder");
            self.collaborators
                .embeddings
                .index(&folder)
                .map_err(|e| Error::collaborator("embeddings", e))?;
            self.indexed.insert(folder);
        }

        Ok(())
    }
}

/// All directories below `root`, parents before children, siblings by name.
fn subfolders(root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            folders.push(entry.into_path());
        }
    }
    Ok(folders)
}

fn reply(action: Action, to: &str, details: &str, usage: Option<TokenUsage>) -> Result<Reply> {
    let body = Message::new().with(Field::Details, details);
    let message = Template::new(action).render(RESEARCHER, to, &body)?;
    Ok(Reply { message, usage })
}
