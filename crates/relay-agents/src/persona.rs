//! Recipient-specific personas the user agent speaks in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The voice the user agent adopts towards one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Agent identity this persona addresses (e.g. "CODER")
    pub recipient: String,
    /// Name written in the `FROM`/`TO` fields when speaking to the recipient
    pub name: String,
    /// Short description of tone and intent, used when prompting
    #[serde(default)]
    pub voice: String,
}

impl Persona {
    pub fn new(
        recipient: impl Into<String>,
        name: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            name: name.into(),
            voice: voice.into(),
        }
    }
}

/// Personas keyed by recipient, with a fallback for unknown recipients.
#[derive(Debug, Clone)]
pub struct PersonaBook {
    personas: HashMap<String, Persona>,
    fallback: Persona,
}

impl PersonaBook {
    /// Personas shipped with the agent.
    pub fn builtin() -> Self {
        let personas = [
            Persona::new(
                "CODER",
                "USER",
                "Product owner: states requirements and acceptance criteria, not implementation.",
            ),
            Persona::new(
                "PLANNER",
                "USER",
                "Stakeholder: describes the goal and constraints, leaves sequencing to the planner.",
            ),
            Persona::new(
                "RESEARCHER",
                "USER",
                "Curious colleague: asks focused questions and expects cited answers.",
            ),
            Persona::new(
                "EXECUTOR",
                "USER",
                "Operator: approves commands and reports their outcome verbatim.",
            ),
        ];

        Self {
            personas: personas
                .into_iter()
                .map(|p| (normalize(&p.recipient), p))
                .collect(),
            fallback: Persona::new("*", "USER", "Plain, direct user voice."),
        }
    }

    /// Replace or add personas; later entries win over earlier ones.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = Persona>) -> Self {
        for persona in overrides {
            self.personas.insert(normalize(&persona.recipient), persona);
        }
        self
    }

    /// Persona for `recipient`, matched case-insensitively.
    pub fn for_recipient(&self, recipient: &str) -> &Persona {
        self.personas
            .get(&normalize(recipient))
            .unwrap_or(&self.fallback)
    }
}

impl Default for PersonaBook {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(recipient: &str) -> String {
    recipient.trim().to_uppercase()
}
