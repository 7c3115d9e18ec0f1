//! Node identifiers backed by a global string interner.
//!
//! This module provides the [`NodeId`] type. Identifiers are `Copy`, cheap to
//! hash, and compare by interned symbol.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned node identifier.
///
/// Creating a `NodeId` performs no validation; use [`NodeId::is_valid`]
/// before registering a node under it.
///
/// # Examples
///
/// ```
/// use netgraph_core::identifier::NodeId;
///
/// let a = NodeId::new("hub");
/// let b: NodeId = "hub".into();
/// assert_eq!(a, b);
/// assert_eq!(a, "hub");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(DefaultSymbol);

impl NodeId {
    /// Creates a `NodeId` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns true if `candidate` is identifier-shaped: non-empty and free
    /// of whitespace and control characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use netgraph_core::identifier::NodeId;
    ///
    /// assert!(NodeId::is_valid("0"));
    /// assert!(NodeId::is_valid("user-service"));
    /// assert!(!NodeId::is_valid(""));
    /// assert!(!NodeId::is_valid("two words"));
    /// ```
    pub fn is_valid(candidate: &str) -> bool {
        !candidate.is_empty()
            && !candidate
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
    }

    /// Returns the identifier's string form.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for NodeId {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = NodeId::new("alpha");
        let id2 = NodeId::new("alpha");
        let id3 = NodeId::new("beta");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "alpha");
    }

    #[test]
    fn test_display_trait() {
        let id = NodeId::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_is_valid() {
        assert!(NodeId::is_valid("0"));
        assert!(NodeId::is_valid("a::b"));
        assert!(!NodeId::is_valid(""));
        assert!(!NodeId::is_valid(" "));
        assert!(!NodeId::is_valid("tab\tid"));
        assert!(!NodeId::is_valid("line\nbreak"));
    }

    #[test]
    fn test_hash_and_eq() {
        let mut map = HashMap::new();
        map.insert(NodeId::new("key1"), "value1");
        map.insert(NodeId::new("key2"), "value2");

        assert_eq!(map.get(&NodeId::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str_ref() {
        let id = NodeId::new("Component");
        let name = String::from("Component");
        assert!(id == name.as_str());
        assert!(id != "Element");
    }
}
