//! Error types produced while translating messages and loading settings.

mod types;

pub use types::{IntlError, IntlErrorCode, SettingsError};
