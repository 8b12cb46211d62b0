//! The ordered field mapping exchanged between agents.

use crate::{Action, Error, Field, Result};

/// An ordered mapping of field name to value.
///
/// Keys keep the position of their first appearance. Writing a key that is
/// already present replaces its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    fields: Vec<(String, String)>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Message::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn value_mut(&mut self, key: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn sender(&self) -> Option<&str> {
        self.field(Field::From)
    }

    pub fn recipient(&self) -> Option<&str> {
        self.field(Field::To)
    }

    pub fn details(&self) -> Option<&str> {
        self.field(Field::Details)
    }

    /// Resolve the `ACTION` field and check the action's required fields.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedMessage`] if `ACTION` is absent or a field the
    ///   action requires is missing
    /// - [`Error::UnknownAction`] if the action name is not part of the protocol
    pub fn action(&self) -> Result<Action> {
        let name = self
            .field(Field::Action)
            .ok_or_else(|| Error::malformed("missing ACTION field"))?;
        let action: Action = name.parse()?;

        let required = Field::ENVELOPE.iter().chain(action.body_fields());
        for field in required {
            if !self.contains(field.as_str()) {
                return Err(Error::malformed(format!(
                    "'{}' message is missing required field {}",
                    action, field
                )));
            }
        }

        Ok(action)
    }
}

impl<K, V> FromIterator<(K, V)> for Message
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut message = Message::new();
        for (key, value) in iter {
            message.insert(key, value);
        }
        message
    }
}
