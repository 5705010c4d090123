//! Hooks used when a config does not supply its own.

use std::sync::Arc;

use crate::config::{ErrorHook, FallbackContext, MessageFallbackHook};
use crate::IntlError;

/// Logs a translation failure at `error` level.
pub fn log_error(error: &IntlError) {
    tracing::error!(
        code = %error.code(),
        detail = error.message().unwrap_or_default(),
        "translation failed"
    );
}

/// Logs an environment diagnostic at `warn` level.
pub fn log_environment(error: &IntlError) {
    tracing::warn!(
        code = %error.code(),
        detail = error.message().unwrap_or_default(),
        "intl environment fallback"
    );
}

/// Falls back to the key, prefixed by the namespace when one is set.
#[must_use]
pub fn key_fallback(context: &FallbackContext<'_>) -> String {
    match context.namespace {
        Some(namespace) => format!("{namespace}.{}", context.key),
        None => context.key.to_owned(),
    }
}

pub(crate) fn on_error() -> ErrorHook {
    Arc::new(log_error)
}

pub(crate) fn environment_hook() -> ErrorHook {
    Arc::new(log_environment)
}

pub(crate) fn get_message_fallback() -> MessageFallbackHook {
    Arc::new(key_fallback)
}
