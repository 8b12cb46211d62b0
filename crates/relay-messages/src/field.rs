//! Field names used on the wire.

use serde::Serialize;
use std::fmt;

/// A field declared by at least one message template.
///
/// Parsed messages may carry keys outside this set; they are kept as plain
/// strings in [`crate::Message`] and ignored by the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Field {
    From,
    To,
    Action,
    Details,
    Command,
    Url,
    Term,
}

impl Field {
    /// Fields every message carries, in wire order.
    pub const ENVELOPE: [Field; 3] = [Field::From, Field::To, Field::Action];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "FROM",
            Self::To => "TO",
            Self::Action => "ACTION",
            Self::Details => "DETAILS",
            Self::Command => "COMMAND",
            Self::Url => "URL",
            Self::Term => "TERM",
        }
    }

    /// Look up a declared field by its wire name (exact, uppercase).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "FROM" => Some(Self::From),
            "TO" => Some(Self::To),
            "ACTION" => Some(Self::Action),
            "DETAILS" => Some(Self::Details),
            "COMMAND" => Some(Self::Command),
            "URL" => Some(Self::Url),
            "TERM" => Some(Self::Term),
            _ => None,
        }
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
