//! Message catalogues addressed by dotted keys.
//!
//! A [`MessageTree`] is supplied by the caller, usually deserialised from a
//! JSON or TOML catalogue with `serde`. The tree is never mutated once handed
//! to a translator; lookups go through [`resolve`], which classifies the node
//! it finds so callers never inspect raw shapes themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod resolve;

pub use resolve::{Resolved, resolve};

/// Nested mapping from key segments to messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTree {
    entries: BTreeMap<String, MessageNode>,
}

/// A single node within a [`MessageTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageNode {
    /// Translatable message text.
    Text(String),
    /// Arrays are accepted by the deserialiser but never translated.
    List(Vec<MessageNode>),
    /// Nested namespace.
    Tree(MessageTree),
}

impl MessageTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts `node` under a single key segment, replacing any prior node.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<MessageNode>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Builder-style variant of [`MessageTree::insert`].
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::MessageTree;
    ///
    /// let tree = MessageTree::new()
    ///     .with("greeting", "Hello {name}")
    ///     .with("nav", MessageTree::new().with("home", "Home"));
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, node: impl Into<MessageNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Returns the node stored directly under `segment`.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&MessageNode> {
        self.entries.get(segment)
    }

    /// Number of entries at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when this level holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries at this level in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Parses a catalogue from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not valid JSON or holds
    /// values other than strings, arrays, and objects.
    #[cfg(feature = "serde_json")]
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parses a catalogue from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the `toml` error when the text fails to parse or holds values
    /// other than strings, arrays, and tables.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl<K, V> FromIterator<(K, V)> for MessageTree
where
    K: Into<String>,
    V: Into<MessageNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, node)| (key.into(), node.into()))
                .collect(),
        }
    }
}

impl From<&str> for MessageNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MessageNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<MessageTree> for MessageNode {
    fn from(value: MessageTree) -> Self {
        Self::Tree(value)
    }
}

impl From<Vec<Self>> for MessageNode {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests;
