//! Run-scoped filesystem layout.
//!
//! Everything a run persists lives under `<workspace>/.relay/<run_id>/`:
//!
//! ```text
//! <workspace>/
//!   .relay/
//!     config.toml          settings shared by all runs
//!     <run_id>/
//!       steps.json         step descriptions for this run
//!       logs/progress.log  step progress display
//!       researcher/        research data, root of the embeddings index
//! ```

use std::path::{Path, PathBuf};

/// Fixed names used in the run layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPath {
    /// The `.relay` directory at the workspace root
    RelayDir,
    /// The `config.toml` settings file inside `.relay`
    Settings,
    /// The `researcher` research-data folder inside a run
    ResearchDir,
    /// The `logs` directory inside a run
    LogsDir,
    /// The `progress.log` file inside `logs`
    ProgressLog,
    /// The `steps.json` file inside a run
    Steps,
}

impl RunPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelayDir => ".relay",
            Self::Settings => "config.toml",
            Self::ResearchDir => "researcher",
            Self::LogsDir => "logs",
            Self::ProgressLog => "progress.log",
            Self::Steps => "steps.json",
        }
    }
}

impl AsRef<Path> for RunPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for RunPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved paths for one run in one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    workspace: PathBuf,
    run_id: String,
}

impl RunLayout {
    pub fn new(workspace: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            run_id: run_id.into(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn relay_dir(&self) -> PathBuf {
        self.workspace.join(RunPath::RelayDir)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.relay_dir().join(RunPath::Settings)
    }

    pub fn run_dir(&self) -> PathBuf {
        self.relay_dir().join(&self.run_id)
    }

    pub fn research_dir(&self) -> PathBuf {
        self.run_dir().join(RunPath::ResearchDir)
    }

    pub fn progress_log(&self) -> PathBuf {
        self.run_dir()
            .join(RunPath::LogsDir)
            .join(RunPath::ProgressLog)
    }

    pub fn steps_file(&self) -> PathBuf {
        self.run_dir().join(RunPath::Steps)
    }
}
