//! The `compose` command.

use relay_agents::{Composer, PersonaBook, Settings};
use std::path::Path;

use crate::cli::ComposeKind;
use crate::error::Result;

/// Render an outbound message from the user.
///
/// Persona overrides are read from the workspace settings when a workspace
/// is known; otherwise the built-in personas are used.
pub fn run_compose(
    workspace: Option<&Path>,
    kind: ComposeKind,
    to: &str,
    details: &str,
) -> Result<String> {
    let personas = match workspace {
        Some(workspace) => {
            let settings = Settings::for_workspace(workspace)?;
            PersonaBook::builtin().with_overrides(settings.personas)
        }
        None => PersonaBook::builtin(),
    };
    let composer = Composer::new(personas);

    let text = match kind {
        ComposeKind::ProblemStatement => composer.problem_statement(details, to)?,
        ComposeKind::Answer => composer.answer(details, to)?,
        ComposeKind::Feedback => composer.feedback(details, to)?,
    };
    Ok(text)
}
