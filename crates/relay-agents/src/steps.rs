//! The step list of a run.
//!
//! Steps are produced once per run (by a planner answering `generate-steps`)
//! and stored as a JSON array of descriptions. Their text and order never
//! change afterwards; only their displayed status does.

use std::path::Path;

use crate::{Error, Result};

/// One unit of the solution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    number: usize,
    description: String,
}

impl Step {
    /// 1-based position of the step in the plan.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Number a list of descriptions from 1.
pub fn number_steps<I, S>(descriptions: I) -> Vec<Step>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    descriptions
        .into_iter()
        .enumerate()
        .map(|(index, description)| Step {
            number: index + 1,
            description: description.into(),
        })
        .collect()
}

/// Load step descriptions from a JSON array of strings.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Steps`] if
/// it is not a JSON array of strings.
pub fn load_steps(path: &Path) -> Result<Vec<Step>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let descriptions: Vec<String> = serde_json::from_str(&content).map_err(|e| Error::Steps {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), count = descriptions.len(), "Loaded steps");
    Ok(number_steps(descriptions))
}
