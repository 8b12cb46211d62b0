//! Authoring outbound messages on behalf of the user.

use relay_messages::{Action, Field, Message, Template};

use crate::persona::{Persona, PersonaBook};
use crate::Result;

/// Renders the user's outbound messages in the persona chosen for each recipient.
///
/// Composing is pure: nothing is recorded and no progress state changes.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    personas: PersonaBook,
}

impl Composer {
    pub fn new(personas: PersonaBook) -> Self {
        Self { personas }
    }

    pub fn persona_for(&self, recipient: &str) -> &Persona {
        self.personas.for_recipient(recipient)
    }

    /// Problem statement from the user persona to `recipient`.
    pub fn problem_statement(&self, problem: &str, recipient: &str) -> Result<String> {
        let persona = self.persona_for(recipient);
        tracing::debug!(recipient, persona = %persona.name, voice = %persona.voice, "Composing problem statement");
        render(Action::ProblemStatement, &persona.name, recipient, problem)
    }

    /// Answer authored for `recipient`, addressed to the user persona.
    pub fn answer(&self, answer: &str, recipient: &str) -> Result<String> {
        let persona = self.persona_for(recipient);
        tracing::debug!(recipient, persona = %persona.name, voice = %persona.voice, "Composing answer");
        render(Action::Answer, recipient, &persona.name, answer)
    }

    /// Feedback authored for `recipient`, addressed to the user persona.
    pub fn feedback(&self, feedback: &str, recipient: &str) -> Result<String> {
        let persona = self.persona_for(recipient);
        tracing::debug!(recipient, persona = %persona.name, voice = %persona.voice, "Composing feedback");
        render(Action::Feedback, recipient, &persona.name, feedback)
    }
}

fn render(action: Action, from: &str, to: &str, details: &str) -> Result<String> {
    let body = Message::new().with(Field::Details, details);
    Ok(Template::new(action).render(from, to, &body)?)
}
