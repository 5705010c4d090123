//! Key-to-text translation with caching and fallbacks.
//!
//! A [`Translator`] resolves a key in its catalogue, compiles the message
//! through the configured [`crate::MessageCompiler`] (reusing the shared
//! [`FormatCache`]), and formats it with the call's values. Every call is
//! total: failures are reported through `on_error` and replaced with the
//! text produced by `get_message_fallback`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use unic_langid::LanguageIdentifier;

use crate::cache::{CacheKey, FormatCache};
use crate::config::{FallbackContext, IntlConfig};
use crate::messages::{MessageTree, Resolved, resolve};
use crate::values::MarkupHandler;
use crate::{
    FormatConfig, Formats, Formatted, IntlError, IntlErrorCode, RichNode, TranslationValues,
    Value,
};

/// Outcome of [`Translator::raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMessage<'a> {
    /// The node found at the key, unformatted.
    Resolved(Resolved<'a>),
    /// Fallback text returned because the key did not resolve.
    Fallback(String),
}

/// Translates keys for one locale and catalogue.
///
/// Cloning is cheap; clones share the config and the cache.
#[derive(Clone)]
pub struct Translator {
    config: Arc<IntlConfig>,
    cache: FormatCache,
    namespace: Option<Arc<str>>,
    catalogue: Result<Arc<MessageTree>, IntlError>,
}

impl Translator {
    /// Creates a translator that compiles into `cache`.
    ///
    /// Reports `ENVIRONMENT_FALLBACK` through the environment hook when no
    /// time zone is configured, and `MISSING_MESSAGE` through `on_error`
    /// when no catalogue is configured. The latter is reported only here;
    /// individual calls then return their fallback silently.
    #[must_use]
    pub fn new(config: IntlConfig, cache: &FormatCache) -> Self {
        if config.time_zone.is_none() {
            (config.environment_hook)(&IntlError::new(
                IntlErrorCode::EnvironmentFallback,
                "There is no time zone configured; dates and times render in UTC, which can \
                 differ between environments. Consider configuring a global default.",
            ));
        }

        let catalogue = config.messages.clone().ok_or_else(|| {
            let error = IntlError::new(
                IntlErrorCode::MissingMessage,
                "No messages were configured for this translator.",
            );
            (config.on_error)(&error);
            error
        });

        Self {
            config: Arc::new(config),
            cache: cache.clone(),
            namespace: None,
            catalogue,
        }
    }

    /// Locale this translator formats for.
    #[must_use]
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.config.locale
    }

    /// Cache compiled messages are stored in.
    #[must_use]
    pub const fn cache(&self) -> &FormatCache {
        &self.cache
    }

    /// Namespace prefixed to every key, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns a translator resolving keys beneath `namespace`.
    ///
    /// Namespaces nest: scoping an already scoped translator joins the two
    /// with a `.`.
    #[must_use]
    pub fn with_namespace(&self, namespace: &str) -> Self {
        let joined = match self.namespace() {
            Some(outer) => format!("{outer}.{namespace}"),
            None => namespace.to_owned(),
        };
        Self {
            namespace: Some(Arc::from(joined)),
            ..self.clone()
        }
    }

    /// Translates `key` into plain text.
    ///
    /// Messages that format to rich output are reported as
    /// `INVALID_MESSAGE`; use [`Translator::rich`] for those.
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::{FormatCache, IntlConfig, MessageTree, TranslationValues, Translator};
    /// use unic_langid::langid;
    ///
    /// let config = IntlConfig::builder(langid!("en"))
    ///     .messages(MessageTree::new().with("greeting", "Hello {name}"))
    ///     .build();
    /// let t = Translator::new(config, &FormatCache::new());
    /// let values = TranslationValues::new().with("name", "Ana");
    /// assert_eq!(t.translate("greeting", Some(&values), None), "Hello Ana");
    /// assert_eq!(t.translate("missing", None, None), "missing");
    /// ```
    #[must_use]
    pub fn translate(
        &self,
        key: &str,
        values: Option<&TranslationValues>,
        formats: Option<&Formats>,
    ) -> String {
        match self.format_message(key, values, formats) {
            Formatted::Text(text) => text,
            Formatted::Rich(_) => self.fail(
                key,
                &IntlError::new(
                    IntlErrorCode::InvalidMessage,
                    format!(
                        "The message `{key}` didn't resolve to a string. Use `rich` to format \
                         rich text."
                    ),
                ),
            ),
        }
    }

    /// Translates `key`, allowing markup handlers to produce rich output.
    #[must_use]
    pub fn rich(
        &self,
        key: &str,
        values: Option<&TranslationValues>,
        formats: Option<&Formats>,
    ) -> Formatted {
        self.format_message(key, values, formats)
    }

    /// Returns the node at `key` without formatting it.
    #[must_use]
    pub fn raw(&self, key: &str) -> RawMessage<'_> {
        let messages = match self.messages() {
            Ok(messages) => messages,
            Err(error) => return RawMessage::Fallback(self.fallback(key, error)),
        };
        match resolve(Some(messages), &self.qualified(key)) {
            Ok(resolved) => RawMessage::Resolved(resolved),
            Err(error) => RawMessage::Fallback(self.fail(key, &error)),
        }
    }

    fn format_message(
        &self,
        key: &str,
        values: Option<&TranslationValues>,
        formats: Option<&Formats>,
    ) -> Formatted {
        let messages = match self.messages() {
            Ok(messages) => messages,
            Err(error) => return Formatted::Text(self.fallback(key, error)),
        };
        let full_key = self.qualified(key);
        let message = match resolve(Some(messages), &full_key) {
            Ok(Resolved::Text(message)) => message,
            Ok(Resolved::Subtree(_)) => {
                return Formatted::Text(self.fail(
                    key,
                    &IntlError::new(
                        IntlErrorCode::InsufficientPath,
                        format!(
                            "Message at `{full_key}` resolved to an object, but only strings \
                             are supported. Use a `.` to retrieve nested messages."
                        ),
                    ),
                ));
            }
            Ok(Resolved::UnsupportedArray(_)) => {
                return Formatted::Text(self.fail(
                    key,
                    &IntlError::new(
                        IntlErrorCode::InvalidMessage,
                        format!(
                            "Message at `{full_key}` resolved to an array, but only strings \
                             are supported."
                        ),
                    ),
                ));
            }
            Err(error) => return Formatted::Text(self.fail(key, &error)),
        };

        if let Some(plain) = plain_message(message, values) {
            return Formatted::Text(plain);
        }

        let cache_key = CacheKey::new(&self.config.locale, &full_key, message);
        let compiled = if let Some(compiled) = self.cache.get(&cache_key) {
            compiled
        } else {
            tracing::trace!(key = %cache_key, "format cache miss");
            let format_config = FormatConfig::new(
                &self.config.formats.merged(formats),
                self.config.time_zone,
            );
            match self
                .config
                .compiler
                .compile(message, &self.config.locale, &format_config)
            {
                Ok(compiled) => {
                    self.cache.set(cache_key, Arc::clone(&compiled));
                    compiled
                }
                Err(err) => {
                    return Formatted::Text(self.fail(
                        key,
                        &IntlError::new(IntlErrorCode::InvalidMessage, err.to_string()),
                    ));
                }
            }
        };

        let merged = self.config.default_translation_values.overlaid(values);
        match compiled.format(&keyed_markup(&merged)) {
            Ok(formatted) => formatted,
            Err(err) => Formatted::Text(self.fail(
                key,
                &IntlError::new(IntlErrorCode::FormattingError, err.to_string()),
            )),
        }
    }

    fn messages(&self) -> Result<&MessageTree, &IntlError> {
        self.catalogue.as_deref()
    }

    fn qualified(&self, key: &str) -> String {
        match self.namespace() {
            Some(namespace) => format!("{namespace}.{key}"),
            None => key.to_owned(),
        }
    }

    /// Reports `error` and returns the fallback for `key`.
    fn fail(&self, key: &str, error: &IntlError) -> String {
        (self.config.on_error)(error);
        self.fallback(key, error)
    }

    fn fallback(&self, key: &str, error: &IntlError) -> String {
        (self.config.get_message_fallback)(&FallbackContext {
            error,
            key,
            namespace: self.namespace(),
        })
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.config.locale)
            .field("namespace", &self.namespace)
            .field("cache", &self.cache)
            .field("has_messages", &self.catalogue.is_ok())
            .finish_non_exhaustive()
    }
}

/// Returns the message verbatim when it can skip compilation.
///
/// Only applies when the caller passed no values. Messages that still hold
/// `{` or `<` after unescaping `'{` and `'}` are compiled, so forgotten
/// values surface as formatting errors.
fn plain_message(message: &str, values: Option<&TranslationValues>) -> Option<String> {
    if values.is_some() {
        return None;
    }
    let unescaped = message.replace("'{", "{").replace("'}", "}");
    if unescaped.contains(['{', '<']) {
        None
    } else {
        Some(unescaped)
    }
}

/// Wraps markup handlers so every element they return is keyed
/// `{name}{index}`, with the index counting calls within one format.
fn keyed_markup(values: &TranslationValues) -> TranslationValues {
    values
        .iter()
        .map(|(name, value)| {
            let prepared = match value {
                Value::Markup(handler) => keyed_handler(name, handler),
                plain => plain.clone(),
            };
            (name.to_owned(), prepared)
        })
        .collect()
}

fn keyed_handler(name: &str, handler: &MarkupHandler) -> Value {
    let inner = Arc::clone(handler);
    let name = name.to_owned();
    let counter = AtomicUsize::new(0);
    Value::markup(move |children| match (inner.as_ref())(children) {
        RichNode::Element { tag, children, .. } => {
            let index = counter.fetch_add(1, Ordering::Relaxed);
            RichNode::Element {
                tag,
                key: Some(format!("{name}{index}")),
                children,
            }
        }
        text @ RichNode::Text(_) => text,
    })
}
