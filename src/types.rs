//! Identifiers and the event-type selector accepted by the public operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a monitoring context (one debugging session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Creates a new random context id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a context's dispatch listener.
///
/// Binders compare listeners by this id, so detach calls match the attach
/// that registered them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Creates a new random listener id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable registry-local id of a monitored target.
///
/// Assigned on the first recorded pair and released when the target's last
/// pair is forgotten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(u64);

impl TargetId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which event types an operation applies to.
///
/// `All` is the "no types given" form and means the full catalog. A single
/// name may be a family or a literal event type; a list mixes both.
///
/// # Examples
///
/// ```
/// use eventwatch::EventTypes;
///
/// assert_eq!(EventTypes::from("mouse"), EventTypes::One("mouse".to_string()));
/// assert_eq!(EventTypes::from(None::<&str>), EventTypes::All);
/// assert!(EventTypes::from(vec!["key", "click"]).is_list());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTypes {
    /// Every known concrete event type.
    #[default]
    All,
    /// A family name or a single literal type.
    One(String),
    /// Family names and literal types, resolved element by element.
    Many(Vec<String>),
}

impl EventTypes {
    /// Returns true for the catalog-wide selector.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns true for a list selector.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl From<&str> for EventTypes {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for EventTypes {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<&String> for EventTypes {
    fn from(name: &String) -> Self {
        Self::One(name.clone())
    }
}

impl<S: Into<String>> From<Vec<S>> for EventTypes {
    fn from(names: Vec<S>) -> Self {
        Self::Many(names.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for EventTypes {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventTypes {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<E: Into<EventTypes>> From<Option<E>> for EventTypes {
    fn from(types: Option<E>) -> Self {
        types.map_or(Self::All, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_ids_are_unique() {
        assert_ne!(ContextId::new(), ContextId::new());
    }

    #[test]
    fn test_target_id_display() {
        assert_eq!(TargetId::new(7).to_string(), "#7");
        assert_eq!(TargetId::new(7).get(), 7);
    }

    #[test]
    fn test_event_types_conversions() {
        assert_eq!(EventTypes::from("click"), EventTypes::One("click".to_string()));
        assert_eq!(
            EventTypes::from(["mouse", "keydown"]),
            EventTypes::Many(vec!["mouse".to_string(), "keydown".to_string()])
        );
        assert_eq!(EventTypes::from(Some("key")), EventTypes::One("key".to_string()));
        assert!(EventTypes::from(None::<String>).is_all());
        assert!(EventTypes::default().is_all());
    }

    #[test]
    fn test_event_types_untagged_serde() {
        let all: EventTypes = serde_json::from_str("null").unwrap();
        assert!(all.is_all());

        let one: EventTypes = serde_json::from_str("\"mouse\"").unwrap();
        assert_eq!(one, EventTypes::One("mouse".to_string()));

        let many: EventTypes = serde_json::from_str("[\"mouse\", \"load\"]").unwrap();
        assert!(many.is_list());
    }
}
