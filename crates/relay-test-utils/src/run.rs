//! [`TestRun`] builder for relay test scenarios.

use relay_agents::{RunConfig, RunLayout};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace holding the files of a single run.
///
/// # Example
///
/// ```rust,no_run
/// use relay_test_utils::TestRun;
///
/// let run = TestRun::new("run-1").with_steps(&["Create project", "Add tests"]);
/// run.assert_file_exists(".relay/run-1/steps.json");
/// ```
pub struct TestRun {
    temp_dir: TempDir,
    run_id: String,
}

impl TestRun {
    /// Create an empty workspace for `run_id`.
    pub fn new(run_id: &str) -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            run_id: run_id.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn layout(&self) -> RunLayout {
        RunLayout::new(self.root(), &self.run_id)
    }

    pub fn config(&self) -> RunConfig {
        RunConfig::new(self.root(), &self.run_id).unwrap()
    }

    /// Write `steps.json` for the run.
    pub fn with_steps(self, steps: &[&str]) -> Self {
        let path = self.layout().steps_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string(steps).unwrap()).unwrap();
        self
    }

    /// Write `.relay/config.toml` with the given TOML body.
    pub fn with_settings(self, toml: &str) -> Self {
        let path = self.layout().settings_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, toml).unwrap();
        self
    }

    /// Create `relative` (and its parents) under the research folder.
    pub fn add_research_folder(&self, relative: &str) -> PathBuf {
        let path = self.layout().research_dir().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Contents of the progress log, or `None` if it has not been written.
    pub fn progress_log(&self) -> Option<String> {
        fs::read_to_string(self.layout().progress_log()).ok()
    }

    /// Progress log lines after the header.
    pub fn progress_lines(&self) -> Vec<String> {
        self.progress_log()
            .unwrap_or_default()
            .lines()
            .filter(|line| line.starts_with('['))
            .map(str::to_string)
            .collect()
    }

    /// Assert that `path` (relative to the workspace root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the workspace root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
