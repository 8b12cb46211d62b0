//! Rendering messages to wire text.
//!
//! Each [`Action`] has exactly one [`Template`]. The template fixes the field
//! layout (`FROM`, `TO`, `ACTION`, then the action's body fields) and refuses
//! to render when a required field is missing.

use crate::parser::breaks_value;
use crate::{Action, Error, Field, Message, Result};

/// Marker line that opens and closes a message block.
pub const FENCE: &str = "```";

/// Fixed textual layout for one message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    action: Action,
}

impl Template {
    pub const fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn description(&self) -> &'static str {
        self.action.description()
    }

    /// Every field a rendered message of this kind carries, in wire order.
    pub fn required_fields(&self) -> Vec<Field> {
        Field::ENVELOPE
            .iter()
            .chain(self.action.body_fields())
            .copied()
            .collect()
    }

    /// Render a message from `from` to `to` using the body fields in `body`.
    ///
    /// Only the template's declared body fields are read from `body`; anything
    /// else in the mapping is ignored. Values are written verbatim. Lines after
    /// the first must not look like a `KEY:` line or a fence, since the parser
    /// would read them as a new field or the end of the block. Surrounding
    /// whitespace and blank lines are not preserved by [`crate::parse`].
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if `from` or `to` is empty or a body field is
    ///   absent from `body`
    /// - [`Error::AmbiguousValue`] if a value line would be read back as a
    ///   separate field or a fence
    ///
    /// # Example
    ///
    /// ```
    /// use relay_messages::{Action, Field, Message, Template};
    ///
    /// let body = Message::new().with(Field::Details, "Starting step 1");
    /// let text = Template::new(Action::StepStarted).render("CODER", "USER", &body).unwrap();
    /// assert!(text.contains("ACTION: step-started"));
    /// ```
    pub fn render(&self, from: &str, to: &str, body: &Message) -> Result<String> {
        let missing = |field| Error::MissingField {
            action: self.action,
            field,
        };
        if from.trim().is_empty() {
            return Err(missing(Field::From));
        }
        if to.trim().is_empty() {
            return Err(missing(Field::To));
        }

        let mut lines = vec![
            format!("{}: {}", Field::From, from),
            format!("{}: {}", Field::To, to),
            format!("{}: {}", Field::Action, self.action),
        ];
        for &field in self.action.body_fields() {
            let value = body.field(field).ok_or_else(|| missing(field))?;
            if let Some(line) = value.lines().skip(1).find(|line| breaks_value(line)) {
                return Err(Error::AmbiguousValue {
                    action: self.action,
                    field,
                    line: line.trim().to_string(),
                });
            }
            lines.push(format!("{}: {}", field, value));
        }

        tracing::debug!(action = %self.action, from, to, "Rendered message");
        Ok(format!("{FENCE}\n{}\n{FENCE}", lines.join("\n")))
    }

    /// Render the template with placeholder values, for prompts and help text.
    pub fn sample(&self, from: &str, to: &str) -> String {
        let body: Message = self
            .action
            .body_fields()
            .iter()
            .map(|&field| (field, self.action.placeholder(field)))
            .collect();
        let mut lines = vec![
            format!("{}: {}", Field::From, from),
            format!("{}: {}", Field::To, to),
            format!("{}: {}", Field::Action, self.action),
        ];
        lines.extend(body.iter().map(|(k, v)| format!("{k}: {v}")));
        format!("{FENCE}\n{}\n{FENCE}", lines.join("\n"))
    }
}

impl From<Action> for Template {
    fn from(action: Action) -> Self {
        Self::new(action)
    }
}

/// Resolve an action name to the template that produces and consumes it.
///
/// # Errors
///
/// Returns [`Error::UnknownAction`] for names outside the protocol.
pub fn resolve(name: &str) -> Result<Template> {
    name.parse::<Action>().map(Template::new)
}
