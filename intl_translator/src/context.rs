//! Request-scoped translator memoisation.
//!
//! A [`TranslationContext`] owns one [`FormatCache`] and builds at most one
//! [`Translator`] per locale, so compiled messages and environment
//! diagnostics are shared across every lookup within the scope.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use unic_langid::LanguageIdentifier;

use crate::{FormatCache, IntlConfig, Translator};

/// Produces the config for a locale the first time it is requested.
pub type ConfigLoader = Arc<dyn Fn(&LanguageIdentifier) -> IntlConfig + Send + Sync>;

/// Memoises translators per locale over a shared cache.
pub struct TranslationContext {
    loader: ConfigLoader,
    cache: FormatCache,
    translators: Mutex<HashMap<LanguageIdentifier, Translator>>,
}

impl TranslationContext {
    /// Creates a context with a fresh cache.
    ///
    /// # Examples
    /// ```rust
    /// use intl_translator::{IntlConfig, MessageTree, TranslationContext};
    /// use unic_langid::langid;
    ///
    /// let context = TranslationContext::new(|locale| {
    ///     IntlConfig::builder(locale.clone())
    ///         .messages(MessageTree::new().with("hi", "Hello"))
    ///         .build()
    /// });
    /// let en = context.translator(&langid!("en"));
    /// assert_eq!(en.translate("hi", None, None), "Hello");
    /// ```
    #[must_use]
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn(&LanguageIdentifier) -> IntlConfig + Send + Sync + 'static,
    {
        Self::with_cache(loader, FormatCache::new())
    }

    /// Creates a context that compiles into an existing cache.
    #[must_use]
    pub fn with_cache<F>(loader: F, cache: FormatCache) -> Self
    where
        F: Fn(&LanguageIdentifier) -> IntlConfig + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
            cache,
            translators: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the translator for `locale`, building it on first use.
    ///
    /// The loader runs without the memo lock held, so it may itself ask this
    /// context for another locale. When two threads race on a new locale,
    /// both build but the first insert wins.
    #[must_use]
    pub fn translator(&self, locale: &LanguageIdentifier) -> Translator {
        if let Some(existing) = self.translators.lock().get(locale) {
            return existing.clone();
        }
        tracing::debug!(%locale, "building translator");
        let built = Translator::new((self.loader)(locale), &self.cache);
        self.translators
            .lock()
            .entry(locale.clone())
            .or_insert(built)
            .clone()
    }

    /// Cache shared by this context's translators.
    #[must_use]
    pub const fn cache(&self) -> &FormatCache {
        &self.cache
    }
}

impl fmt::Debug for TranslationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationContext")
            .field("locales", &self.translators.lock().keys().collect::<Vec<_>>())
            .field("cache", &self.cache)
            .field("loader", &"<loader>")
            .finish()
    }
}
