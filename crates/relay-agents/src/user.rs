//! The user agent: the human's side of the conversation.

use relay_messages::{Action, Message, Template, parse};

use crate::compose::Composer;
use crate::config::Settings;
use crate::layout::RunLayout;
use crate::persona::PersonaBook;
use crate::progress::{ProgressTracker, ProgressUpdate};
use crate::progress_log::ProgressLog;
use crate::steps::{Step, load_steps};
use crate::Result;

/// Dispatches inbound messages for the user and authors outbound ones.
///
/// A process holds exactly one `UserAgent`. It owns the progress tracker
/// and with it the progress log, so every caller must go through the same
/// `&mut UserAgent`; handling is synchronous and one message at a time.
#[derive(Debug)]
pub struct UserAgent {
    tracker: ProgressTracker,
    composer: Composer,
}

impl UserAgent {
    pub fn new(steps: Vec<Step>, log: ProgressLog, composer: Composer) -> Self {
        tracing::info!(steps = steps.len(), log = %log.path().display(), "User agent ready");
        Self {
            tracker: ProgressTracker::new(steps, log),
            composer,
        }
    }

    /// Build the agent for a run: steps from `steps.json`, the run's
    /// progress log and personas from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the step list cannot be loaded.
    pub fn for_run(layout: &RunLayout, settings: &Settings) -> Result<Self> {
        let steps = load_steps(&layout.steps_file())?;
        let personas = PersonaBook::builtin().with_overrides(settings.personas.iter().cloned());
        Ok(Self::new(
            steps,
            ProgressLog::for_layout(layout),
            Composer::new(personas),
        ))
    }

    /// Handle one inbound message and return the acknowledgment to send back.
    ///
    /// Progress actions update the step display first; `inform` is only
    /// acknowledged. Every other action is rejected without touching the
    /// tracker.
    ///
    /// # Errors
    ///
    /// - Malformed text or a missing required field
    /// - [`relay_messages::Error::UnknownAction`] for actions the user agent
    ///   does not handle
    pub fn handle(&mut self, raw: &str) -> Result<String> {
        let message = parse(raw)?;
        let action = message.action()?;
        tracing::info!(%action, from = message.sender(), "User agent received message");

        match action {
            Action::StepStarted | Action::StepCompleted | Action::SolutionComplete => {
                let details = message.details().unwrap_or_default();
                if let ProgressUpdate::Updated { logged: false } =
                    self.tracker.handle(action, details)?
                {
                    tracing::warn!(%action, "Progress recorded but not written to the log");
                }
            }
            Action::Inform => {
                tracing::info!(details = message.details(), "Information received");
            }
            other => {
                return Err(relay_messages::Error::UnknownAction(other.to_string()).into());
            }
        }

        acknowledge(&message)
    }

    pub fn compose_problem_statement(&self, problem: &str, recipient: &str) -> Result<String> {
        self.composer.problem_statement(problem, recipient)
    }

    pub fn compose_answer(&self, answer: &str, recipient: &str) -> Result<String> {
        self.composer.answer(answer, recipient)
    }

    pub fn compose_feedback(&self, feedback: &str, recipient: &str) -> Result<String> {
        self.composer.feedback(feedback, recipient)
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }
}

/// Acknowledgment swapping the sender and recipient of `message`.
fn acknowledge(message: &Message) -> Result<String> {
    let from = message.recipient().unwrap_or_default();
    let to = message.sender().unwrap_or_default();
    Ok(Template::new(Action::Acknowledge).render(from, to, &Message::new())?)
}
