//! The per-run progress log file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::layout::RunLayout;

const PLANNER_ROLE: &str = "Planner: breaks the problem statement into steps, \
hands each step to the agent best suited for it and tracks the steps to completion.";

/// Best-effort writer for the run's step display.
///
/// Every rewrite truncates the file and writes a fresh header followed by
/// the current snapshot. The file handle never outlives a single rewrite.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
    run_id: String,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            run_id: run_id.into(),
        }
    }

    pub fn for_layout(layout: &RunLayout) -> Self {
        Self::new(layout.progress_log(), layout.run_id())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Header written at the top of the file after each truncation.
    pub fn header(&self) -> String {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        format!("# Progress for run {} (updated {now})\n{PLANNER_ROLE}\n\n", self.run_id)
    }

    /// Replace the file contents with the header and `lines`.
    ///
    /// Failures are logged at warn level and reported as `false`; they never
    /// abort message handling.
    pub fn rewrite(&self, lines: &[String]) -> bool {
        match self.try_rewrite(lines) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), lines = lines.len(), "Progress log rewritten");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to rewrite progress log");
                false
            }
        }
    }

    fn try_rewrite(&self, lines: &[String]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.path)?;
        file.write_all(self.header().as_bytes())?;
        for line in lines {
            writeln!(file, "{line}")?;
        }
        file.flush()
    }
}
