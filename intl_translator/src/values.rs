//! Interpolation values and the rich output produced by formatting.
//!
//! Plain values cover the ICU argument types (text, numbers, booleans and
//! date-times). Markup handlers receive the already formatted children of an
//! XML-like tag such as `<b>…</b>` and return the node to splice in its place.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Callback invoked for a rich-text tag with its formatted children.
pub type MarkupHandler = Arc<dyn Fn(Vec<RichNode>) -> RichNode + Send + Sync>;

/// A single interpolation value.
#[derive(Clone)]
pub enum Value {
    /// Text inserted verbatim.
    String(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean, rendered as `true`/`false` and selectable by `select`.
    Bool(bool),
    /// Instant formatted by `date` and `time` arguments.
    DateTime(DateTime<Utc>),
    /// Handler for a rich-text tag.
    Markup(MarkupHandler),
}

impl Value {
    /// Wraps a closure as a markup handler.
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::{RichNode, Value};
    ///
    /// let bold = Value::markup(|children| RichNode::element("strong", children));
    /// assert!(bold.is_markup());
    /// ```
    #[must_use]
    pub fn markup<F>(handler: F) -> Self
    where
        F: Fn(Vec<RichNode>) -> RichNode + Send + Sync + 'static,
    {
        Self::Markup(Arc::new(handler))
    }

    /// Returns `true` for markup handlers.
    #[must_use]
    pub const fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }

    /// Returns the numeric value used for plural selection and number
    /// formatting.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "plural operands above 2^53 are outside any catalogue's range"
    )]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Key used to pick a `select` branch.
    #[must_use]
    pub fn select_key(&self) -> Option<String> {
        match self {
            Self::String(text) => Some(text.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Bool(value) => Some(value.to_string()),
            Self::DateTime(_) | Self::Markup(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.debug_tuple("String").field(text).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::DateTime(value) => f.debug_tuple("DateTime").field(value).finish(),
            Self::Markup(_) => f.write_str("Markup(<handler>)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Named values interpolated into a message.
#[derive(Debug, Clone, Default)]
pub struct TranslationValues {
    entries: BTreeMap<String, Value>,
}

impl TranslationValues {
    /// Creates an empty set of values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces a value, builder style.
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::TranslationValues;
    ///
    /// let values = TranslationValues::new().with("name", "Ana").with("count", 3);
    /// assert_eq!(values.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Looks up a value by argument name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no values are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns `self` overlaid with `overrides`; later values win.
    #[must_use]
    pub fn overlaid(&self, overrides: Option<&Self>) -> Self {
        let mut merged = self.clone();
        if let Some(extra) = overrides {
            merged
                .entries
                .extend(extra.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// A node of rich formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichNode {
    /// Plain text.
    Text(String),
    /// Markup produced by a tag handler.
    Element {
        /// Element name chosen by the handler.
        tag: String,
        /// Identity assigned to distinguish sibling elements.
        key: Option<String>,
        /// Formatted children.
        children: Vec<RichNode>,
    },
}

impl RichNode {
    /// Creates a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates an element without a key.
    #[must_use]
    pub fn element(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Element {
            tag: tag.into(),
            key: None,
            children,
        }
    }

    /// Concatenated text content of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Output of a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted {
    /// Every part was text; the parts were joined.
    Text(String),
    /// At least one part is an element.
    Rich(Vec<RichNode>),
}

impl Formatted {
    /// Collapses formatted parts, joining them into text when possible.
    #[must_use]
    pub fn from_parts(parts: Vec<RichNode>) -> Self {
        if parts.iter().all(|part| matches!(part, RichNode::Text(_))) {
            Self::Text(parts.iter().map(RichNode::text_content).collect())
        } else {
            Self::Rich(parts)
        }
    }

    /// Returns the text when the output is plain.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich(_) => None,
        }
    }
}
