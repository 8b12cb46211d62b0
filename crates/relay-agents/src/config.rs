//! Run configuration and optional workspace settings.
//!
//! [`RunConfig`] comes from the environment and is mandatory: an agent cannot
//! locate its run without a workspace root and a run identifier. [`Settings`]
//! come from `<workspace>/.relay/config.toml` and fall back to defaults when
//! the file does not exist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::{RunLayout, RunPath};
use crate::persona::Persona;
use crate::{Error, Result};

/// Environment variable naming the workspace root.
pub const WORKSPACE_ENV: &str = "RELAY_WORKSPACE";
/// Environment variable naming the current run.
pub const RUN_ID_ENV: &str = "RELAY_RUN_ID";

/// Where the current run lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub workspace: PathBuf,
    pub run_id: String,
}

impl RunConfig {
    /// Build a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the run id is empty or is not a
    /// single path component.
    pub fn new(workspace: impl Into<PathBuf>, run_id: impl Into<String>) -> Result<Self> {
        let workspace = workspace.into();
        let run_id = run_id.into();

        if workspace.as_os_str().is_empty() {
            return Err(Error::configuration(WORKSPACE_ENV, "must not be empty"));
        }
        validate_run_id(&run_id)?;

        Ok(Self { workspace, run_id })
    }

    /// Read `RELAY_WORKSPACE` and `RELAY_RUN_ID` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first missing or empty variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::configuration(key, "is not set as an environment variable"))
        };

        let workspace = required(WORKSPACE_ENV)?;
        let run_id = required(RUN_ID_ENV)?;
        Self::new(workspace, run_id)
    }

    pub fn layout(&self) -> RunLayout {
        RunLayout::new(&self.workspace, &self.run_id)
    }
}

fn validate_run_id(run_id: &str) -> Result<()> {
    if run_id.trim().is_empty() {
        return Err(Error::configuration(RUN_ID_ENV, "must not be empty"));
    }
    if run_id == "." || run_id == ".." || run_id.contains(['/', '\\']) {
        return Err(Error::configuration(
            RUN_ID_ENV,
            format!("'{}' must be a single path component", run_id),
        ));
    }
    Ok(())
}

/// How the research folder is re-indexed after each training request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReindexStrategy {
    /// Re-submit every subfolder of the research folder, every time
    #[default]
    Full,
    /// Only submit subfolders not already submitted by this agent
    Incremental,
}

/// `[research]` table of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    pub reindex: ReindexStrategy,
}

/// Workspace settings loaded from `.relay/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub research: ResearchSettings,
    /// Persona overrides, keyed by their `recipient`
    pub personas: Vec<Persona>,
}

impl Settings {
    /// Load settings from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Settings`] if it is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `.relay/config.toml` under `workspace`.
    pub fn for_workspace(workspace: &Path) -> Result<Self> {
        Self::load(&workspace.join(RunPath::RelayDir).join(RunPath::Settings))
    }

    /// Load the settings file belonging to `layout`'s workspace.
    pub fn for_layout(layout: &RunLayout) -> Result<Self> {
        Self::load(&layout.settings_file())
    }
}
