//! `figment::Jail` plumbing for settings tests.
//!
//! Settings are read from the process environment, so tests that set
//! `INTL_*` variables run inside a jail. These helpers return the closure's
//! output as an `anyhow::Result` and bridge settings errors into the error
//! type the jail expects.

use anyhow::{Result, anyhow};
use intl_translator::{IntlSettings, SettingsError};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Loads [`IntlSettings`] inside a jail, converting failures for `?`.
///
/// # Errors
///
/// Returns the settings error rendered as a [`figment::Error`].
pub fn load_settings() -> figment::error::Result<IntlSettings> {
    IntlSettings::load().map_err(|err| settings_error(&err))
}

/// Renders a [`SettingsError`] as a [`figment::Error`].
#[must_use]
pub fn settings_error(err: &SettingsError) -> figment::Error {
    figment::Error::from(err.to_string())
}
