//! Translator configuration.
//!
//! [`IntlConfig`] bundles everything a [`crate::Translator`] needs: the
//! locale, the message catalogue, named formats, the time zone, default
//! interpolation values, the error hooks, and the compiler. Build one with
//! [`IntlConfig::builder`]; unset hooks fall back to the functions in
//! [`crate::defaults`].

use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use unic_langid::LanguageIdentifier;

use crate::compiler::{IcuCompiler, MessageCompiler};
use crate::{Formats, IntlError, MessageTree, TranslationValues, defaults};

/// Receives every translation failure before the fallback is computed.
pub type ErrorHook = Arc<dyn Fn(&IntlError) + Send + Sync>;

/// Produces the text returned in place of a failed translation.
pub type MessageFallbackHook = Arc<dyn Fn(&FallbackContext<'_>) -> String + Send + Sync>;

/// Details handed to the [`MessageFallbackHook`].
#[derive(Debug, Clone, Copy)]
pub struct FallbackContext<'a> {
    /// Why the translation failed.
    pub error: &'a IntlError,
    /// Key as passed by the caller, without the namespace.
    pub key: &'a str,
    /// Namespace of the translator, if any.
    pub namespace: Option<&'a str>,
}

/// Settings shared by every call of a translator.
pub struct IntlConfig {
    pub(crate) locale: LanguageIdentifier,
    pub(crate) messages: Option<Arc<MessageTree>>,
    pub(crate) formats: Formats,
    pub(crate) time_zone: Option<Tz>,
    pub(crate) on_error: ErrorHook,
    pub(crate) get_message_fallback: MessageFallbackHook,
    pub(crate) environment_hook: ErrorHook,
    pub(crate) default_translation_values: TranslationValues,
    pub(crate) compiler: Arc<dyn MessageCompiler>,
}

impl IntlConfig {
    /// Starts building a config for `locale`.
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::{FormatCache, IntlConfig, MessageTree, Translator};
    /// use unic_langid::langid;
    ///
    /// let config = IntlConfig::builder(langid!("en"))
    ///     .messages(MessageTree::new().with("title", "Welcome"))
    ///     .build();
    /// let translator = Translator::new(config, &FormatCache::new());
    /// assert_eq!(translator.translate("title", None, None), "Welcome");
    /// ```
    #[must_use]
    pub fn builder(locale: LanguageIdentifier) -> IntlConfigBuilder {
        IntlConfigBuilder::new(locale)
    }

    /// Locale the translator formats for.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Configured time zone, if any.
    #[must_use]
    pub const fn time_zone(&self) -> Option<Tz> {
        self.time_zone
    }

    /// Global named formats.
    #[must_use]
    pub const fn formats(&self) -> &Formats {
        &self.formats
    }
}

impl fmt::Debug for IntlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlConfig")
            .field("locale", &self.locale)
            .field("messages", &self.messages.as_ref().map(|tree| tree.len()))
            .field("formats", &self.formats)
            .field("time_zone", &self.time_zone)
            .field("default_translation_values", &self.default_translation_values)
            .field("on_error", &"<hook>")
            .field("get_message_fallback", &"<hook>")
            .field("environment_hook", &"<hook>")
            .field("compiler", &"<compiler>")
            .finish()
    }
}

/// Builds an [`IntlConfig`].
pub struct IntlConfigBuilder {
    config: IntlConfig,
}

impl IntlConfigBuilder {
    /// Creates a builder with default hooks and the ICU compiler.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self {
            config: IntlConfig {
                locale,
                messages: None,
                formats: Formats::default(),
                time_zone: None,
                on_error: defaults::on_error(),
                get_message_fallback: defaults::get_message_fallback(),
                environment_hook: defaults::environment_hook(),
                default_translation_values: TranslationValues::new(),
                compiler: Arc::new(IcuCompiler::new()),
            },
        }
    }

    /// Sets the message catalogue.
    #[must_use]
    pub fn messages(mut self, messages: impl Into<Arc<MessageTree>>) -> Self {
        self.config.messages = Some(messages.into());
        self
    }

    /// Sets the global named formats.
    #[must_use]
    pub fn formats(mut self, formats: Formats) -> Self {
        self.config.formats = formats;
        self
    }

    /// Sets the zone dates and times render in.
    #[must_use]
    pub const fn time_zone(mut self, time_zone: Tz) -> Self {
        self.config.time_zone = Some(time_zone);
        self
    }

    /// Installs the hook that receives translation failures.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&IntlError) + Send + Sync + 'static,
    {
        self.config.on_error = Arc::new(hook);
        self
    }

    /// Installs the hook that computes fallback text.
    #[must_use]
    pub fn get_message_fallback<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FallbackContext<'_>) -> String + Send + Sync + 'static,
    {
        self.config.get_message_fallback = Arc::new(hook);
        self
    }

    /// Installs the hook that receives `ENVIRONMENT_FALLBACK` diagnostics,
    /// such as a missing time zone.
    #[must_use]
    pub fn environment_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&IntlError) + Send + Sync + 'static,
    {
        self.config.environment_hook = Arc::new(hook);
        self
    }

    /// Sets values merged beneath every call's values.
    #[must_use]
    pub fn default_translation_values(mut self, values: TranslationValues) -> Self {
        self.config.default_translation_values = values;
        self
    }

    /// Replaces the message compiler.
    #[must_use]
    pub fn compiler(mut self, compiler: Arc<dyn MessageCompiler>) -> Self {
        self.config.compiler = compiler;
        self
    }

    /// Finishes the config.
    #[must_use]
    pub fn build(self) -> IntlConfig {
        self.config
    }
}

impl fmt::Debug for IntlConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}
