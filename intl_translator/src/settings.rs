//! Layered settings for building translator configs.
//!
//! [`IntlSettings`] gathers the locale, time zone, and named formats from a
//! `figment` stack: serialized defaults, optional TOML, then environment
//! variables prefixed with [`ENV_PREFIX`]. Nested keys use `__`, so
//! `INTL_FORMATS__NUMBER__MONEY__MINIMUM_FRACTION_DIGITS=2` sets a field of
//! the `money` number format.

use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Serialized};
#[cfg(feature = "toml")]
use figment::providers::{Format as _, Toml};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{Formats, IntlConfig, IntlConfigBuilder, SettingsError, parse_time_zone};

/// Prefix for environment variables read by [`IntlSettings::load`].
pub const ENV_PREFIX: &str = "INTL_";

/// Locale, time zone, and formats shared by every translator of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntlSettings {
    /// BCP 47 language identifier.
    pub locale: String,
    /// IANA zone dates render in; `None` leaves output in UTC and triggers
    /// an `ENVIRONMENT_FALLBACK` diagnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Global named formats.
    pub formats: Formats,
}

impl Default for IntlSettings {
    fn default() -> Self {
        Self {
            locale: String::from("en"),
            time_zone: None,
            formats: Formats::default(),
        }
    }
}

impl IntlSettings {
    /// Figment stack of defaults overlaid with the environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(env_provider())
    }

    /// Loads settings from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when extraction or format validation fails.
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_figment(&Self::figment())
    }

    /// Loads settings from defaults, a TOML document, and the environment,
    /// in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the TOML is malformed or the merged
    /// settings fail validation.
    #[cfg(feature = "toml")]
    pub fn load_with_toml(text: &str) -> Result<Self, SettingsError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(text))
            .merge(env_provider());
        Self::from_figment(&figment)
    }

    /// Extracts and validates settings from any figment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Gathering`] when extraction fails and
    /// [`SettingsError::Format`] or [`SettingsError::TimeZone`] for invalid
    /// named formats.
    pub fn from_figment(figment: &Figment) -> Result<Self, SettingsError> {
        let settings: Self = figment.extract()?;
        settings.formats.validate()?;
        Ok(settings)
    }

    /// Parses the configured locale.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Locale`] for malformed identifiers.
    pub fn locale_id(&self) -> Result<LanguageIdentifier, SettingsError> {
        self.locale
            .parse()
            .map_err(|source| SettingsError::Locale {
                locale: self.locale.clone(),
                source,
            })
    }

    /// Parses the configured time zone, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TimeZone`] for unknown zone names.
    pub fn time_zone(&self) -> Result<Option<Tz>, SettingsError> {
        self.time_zone.as_deref().map(parse_time_zone).transpose()
    }
}

impl IntlConfig {
    /// Starts a builder pre-populated from validated settings.
    ///
    /// Messages and hooks are left for the caller to add.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the locale or time zone is invalid.
    pub fn builder_from_settings(settings: &IntlSettings) -> Result<IntlConfigBuilder, SettingsError> {
        let builder = Self::builder(settings.locale_id()?).formats(settings.formats.clone());
        Ok(match settings.time_zone()? {
            Some(zone) => builder.time_zone(zone),
            None => builder,
        })
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}
