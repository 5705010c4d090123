//! Dotted-key lookup over a [`MessageTree`].

use super::{MessageNode, MessageTree};
use crate::{IntlError, IntlErrorCode};

/// Classification of the node found at a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A translatable message.
    Text(&'a str),
    /// A namespace; translating it is an `INSUFFICIENT_PATH` error.
    Subtree(&'a MessageTree),
    /// An array; translating it is an `INVALID_MESSAGE` error.
    UnsupportedArray(&'a [MessageNode]),
}

impl<'a> From<&'a MessageNode> for Resolved<'a> {
    fn from(node: &'a MessageNode) -> Self {
        match node {
            MessageNode::Text(text) => Self::Text(text),
            MessageNode::Tree(tree) => Self::Subtree(tree),
            MessageNode::List(items) => Self::UnsupportedArray(items),
        }
    }
}

/// Resolves `key` within `tree`.
///
/// A literal match of the full key at the root wins, which lets callers hand
/// in pre-flattened catalogues. Otherwise the key is split on `.` and each
/// segment must name a subtree until the last. Parent paths are never used as
/// a fallback.
///
/// # Errors
///
/// Returns a `MISSING_MESSAGE` [`IntlError`] when `tree` is `None` or the key
/// does not resolve.
///
/// # Examples
/// ```rust
/// use intl_translator::{MessageTree, Resolved, resolve};
///
/// let tree = MessageTree::new().with("nav", MessageTree::new().with("home", "Home"));
/// assert_eq!(resolve(Some(&tree), "nav.home"), Ok(Resolved::Text("Home")));
/// assert!(resolve(Some(&tree), "nav.away").is_err());
/// ```
pub fn resolve<'a>(tree: Option<&'a MessageTree>, key: &str) -> Result<Resolved<'a>, IntlError> {
    let Some(root) = tree else {
        return Err(IntlError::new(
            IntlErrorCode::MissingMessage,
            "No messages available.",
        ));
    };

    if let Some(node) = root.get(key) {
        return Ok(node.into());
    }

    let mut segments = key.split('.');
    let mut current = segments
        .next()
        .and_then(|segment| root.get(segment))
        .ok_or_else(|| missing(key))?;
    for segment in segments {
        let MessageNode::Tree(subtree) = current else {
            return Err(missing(key));
        };
        current = subtree.get(segment).ok_or_else(|| missing(key))?;
    }
    Ok(current.into())
}

fn missing(key: &str) -> IntlError {
    IntlError::new(
        IntlErrorCode::MissingMessage,
        format!("Could not resolve `{key}` in messages."),
    )
}
