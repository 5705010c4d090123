//! Translation error taxonomy and construction-time failures.

use std::fmt;

use thiserror::Error;
use unic_langid::LanguageIdentifierError;

/// Classifies why a translation call fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IntlErrorCode {
    /// No message exists at the requested key, or no messages were configured.
    MissingMessage,
    /// The message is an array, failed to compile, or produced rich output
    /// where plain text was required.
    InvalidMessage,
    /// The key addresses a subtree; the caller must descend further.
    InsufficientPath,
    /// Executing a compiled message failed.
    FormattingError,
    /// Advisory: the environment lacks configuration the output depends on.
    EnvironmentFallback,
}

impl IntlErrorCode {
    /// Returns the stable upper-case identifier for the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingMessage => "MISSING_MESSAGE",
            Self::InvalidMessage => "INVALID_MESSAGE",
            Self::InsufficientPath => "INSUFFICIENT_PATH",
            Self::FormattingError => "FORMATTING_ERROR",
            Self::EnvironmentFallback => "ENVIRONMENT_FALLBACK",
        }
    }
}

impl fmt::Display for IntlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A translation failure handed to the `on_error` hook.
///
/// Translation calls never return these to the caller. Each failure is
/// reported once and then replaced by the configured fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}{}", detail_suffix(.message.as_deref()))]
pub struct IntlError {
    code: IntlErrorCode,
    message: Option<String>,
}

impl IntlError {
    /// Creates an error with a diagnostic message.
    #[must_use]
    pub fn new(code: IntlErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    /// Creates an error carrying only its code.
    #[must_use]
    pub const fn bare(code: IntlErrorCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// Classification of the failure.
    #[must_use]
    pub const fn code(&self) -> IntlErrorCode {
        self.code
    }

    /// Diagnostic detail, when one was recorded.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn detail_suffix(message: Option<&str>) -> String {
    message.map(|detail| format!(": {detail}")).unwrap_or_default()
}

/// Errors surfaced while turning layered settings into a translator config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// Figment failed to gather or extract the settings.
    #[error("failed to gather intl settings: {0}")]
    Gathering(#[from] Box<figment::Error>),

    /// The configured locale is not a valid language identifier.
    #[error("invalid locale '{locale}': {source}")]
    Locale {
        /// Locale string as configured.
        locale: String,
        /// Parser failure reported by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },

    /// The configured time zone is not a known IANA zone name.
    #[error("unknown time zone '{time_zone}': {reason}")]
    TimeZone {
        /// Zone name as configured.
        time_zone: String,
        /// Parser diagnostic from `chrono-tz`.
        reason: String,
    },

    /// A named format failed validation.
    #[error("invalid format '{name}': {message}")]
    Format {
        /// Name the format was registered under.
        name: String,
        /// Human-readable explanation of the problem.
        message: String,
    },
}

impl From<figment::Error> for SettingsError {
    fn from(value: figment::Error) -> Self {
        Self::Gathering(Box::new(value))
    }
}
