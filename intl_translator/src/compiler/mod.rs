//! The seam between translators and the message-formatting engine.
//!
//! Translators never parse message syntax themselves. They hand the raw
//! message to a [`MessageCompiler`], cache the resulting [`CompiledMessage`],
//! and execute it against the call's values. [`IcuCompiler`] is the default
//! engine; [`FluentCompiler`] formats Fluent patterns instead.

use std::sync::Arc;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::{FormatConfig, Formatted, TranslationValues};

#[cfg(feature = "fluent")]
mod fluent;
mod icu;

#[cfg(feature = "fluent")]
pub use fluent::FluentCompiler;
pub use icu::IcuCompiler;

/// Compiles message text into an executable form.
///
/// Implementations must be shareable across threads so one compiler can
/// serve every translator built from a [`crate::TranslationContext`].
pub trait MessageCompiler: Send + Sync {
    /// Parses `pattern` for `locale`, resolving named styles through `formats`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the pattern is not valid for this
    /// engine.
    fn compile(
        &self,
        pattern: &str,
        locale: &LanguageIdentifier,
        formats: &FormatConfig,
    ) -> Result<Arc<dyn CompiledMessage>, CompileError>;
}

/// A message ready to be formatted any number of times.
pub trait CompiledMessage: Send + Sync {
    /// Formats the message with `values`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when a value is missing or has the wrong
    /// type for the argument that consumes it.
    fn format(&self, values: &TranslationValues) -> Result<Formatted, FormatError>;
}

/// Failures raised while compiling a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The pattern is malformed.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax {
        /// Character offset where parsing stopped.
        offset: usize,
        /// What the parser expected.
        message: String,
    },

    /// A `plural`, `selectordinal` or `select` argument lacks an `other` branch.
    #[error("argument `{argument}` has no `other` option")]
    MissingOther {
        /// Argument name.
        argument: String,
    },

    /// A number, date or time style is not registered.
    #[error("unknown {kind} style `{style}`")]
    UnknownStyle {
        /// `number`, `date` or `time`.
        kind: &'static str,
        /// Style name as written in the message.
        style: String,
    },

    /// The backing engine rejected the message.
    #[error("{0}")]
    Engine(String),
}

/// Failures raised while formatting a compiled message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// No value was supplied for an argument.
    #[error("the intl string context variable `{argument}` was not provided")]
    MissingValue {
        /// Argument name.
        argument: String,
    },

    /// A value cannot be used by the argument that consumes it.
    #[error("invalid value for argument `{argument}`: expected {expected}")]
    InvalidValueType {
        /// Argument name.
        argument: String,
        /// Kind of value the argument requires.
        expected: &'static str,
    },

    /// A tag has no markup handler among the values.
    #[error("no markup handler was provided for tag `<{tag}>`")]
    MissingMarkup {
        /// Tag name.
        tag: String,
    },

    /// The engine failed to render the output.
    #[error("{0}")]
    Render(String),
}
