//! Props payload for shadow nodes
//!
//! Props are an ordered list of key/value pairs. The differ never interprets
//! them: it only asks whether two payloads are equal, so the representation
//! stays a plain `Vec` with an extension trait for lookups.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

/// Prop name.
pub type PropKey = CompactString;

/// Node props as ordered key-value pairs.
pub type Props = Vec<(PropKey, PropValue)>;

/// Props shared between snapshots. Unchanged props keep the same allocation,
/// which lets the differ short-circuit on pointer equality.
pub type SharedProps = Arc<Props>;

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(CompactString::from(value))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(CompactString::from(value))
    }
}

/// Extension trait for prop operations on [`Props`]
pub trait PropsExt {
    /// Get a prop value by name
    fn get_prop(&self, name: &str) -> Option<&PropValue>;

    /// Check if a prop exists
    fn has_prop(&self, name: &str) -> bool;

    /// Set a prop value (insert or update)
    fn set_prop(&mut self, name: impl Into<PropKey>, value: impl Into<PropValue>);

    /// Remove a prop by name, returning the old value if present
    fn remove_prop(&mut self, name: &str) -> Option<PropValue>;
}

impl PropsExt for Props {
    fn get_prop(&self, name: &str) -> Option<&PropValue> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn has_prop(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_prop(&mut self, name: impl Into<PropKey>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(prop) = self.iter_mut().find(|(k, _)| k == &name) {
            prop.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_prop(&mut self, name: &str) -> Option<PropValue> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

/// Build a [`Props`] list from `(name, value)` pairs.
pub fn props<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Props
where
    K: Into<PropKey>,
    V: Into<PropValue>,
{
    let mut out = Props::new();
    for (k, v) in pairs {
        out.set_prop(k, v);
    }
    out
}

// =============================================================================
// State
// =============================================================================

/// Component state attached to a shadow node.
///
/// State is revisioned: a component that publishes new state bumps the
/// revision, so two states with equal data but different revisions still
/// count as a change the native view must observe.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Monotonic revision number set by the component layer
    pub revision: u64,
    /// State data
    pub data: Props,
}

impl State {
    /// Create state at a given revision.
    pub fn new(revision: u64, data: Props) -> Self {
        Self { revision, data }
    }
}

/// State shared between snapshots.
pub type SharedState = Arc<State>;

// =============================================================================
// Tests
// =============================================================================
