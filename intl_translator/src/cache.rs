//! Compiled-message cache shared by translators.
//!
//! A [`FormatCache`] is owned by whoever scopes the translation work (a
//! request, a session, or a [`crate::TranslationContext`]) and handed to each
//! translator it builds. Clones share the same storage. Entries live as long
//! as the cache; nothing is evicted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use unic_langid::LanguageIdentifier;

use crate::compiler::CompiledMessage;

/// Identity of a compiled message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    locale: LanguageIdentifier,
    key: String,
    message: String,
}

impl CacheKey {
    /// Builds a key from the locale, the translation key and the raw message.
    #[must_use]
    pub fn new(locale: &LanguageIdentifier, key: &str, message: &str) -> Self {
        Self {
            locale: locale.clone(),
            key: key.to_owned(),
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.locale, self.key, self.message)
    }
}

/// Shared map from [`CacheKey`] to compiled messages.
#[derive(Clone, Default)]
pub struct FormatCache {
    entries: Arc<RwLock<HashMap<CacheKey, Arc<dyn CompiledMessage>>>>,
}

impl FormatCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled message stored under `key`.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<dyn CompiledMessage>> {
        self.entries.read().get(key).cloned()
    }

    /// Stores `compiled` under `key`, replacing any previous entry.
    pub fn set(&self, key: CacheKey, compiled: Arc<dyn CompiledMessage>) {
        self.entries.write().insert(key, compiled);
    }

    /// Returns `true` when `key` has an entry.
    #[must_use]
    pub fn has(&self, key: &CacheKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of compiled messages held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` when nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for FormatCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Tests for cache identity and sharing.
    use super::*;
    use crate::compiler::{FormatError, MessageCompiler};
    use crate::{FormatConfig, Formatted, IcuCompiler, TranslationValues};
    use rstest::rstest;
    use unic_langid::langid;

    fn compiled(pattern: &str) -> Arc<dyn CompiledMessage> {
        IcuCompiler::new()
            .compile(pattern, &langid!("en"), &FormatConfig::default())
            .expect("pattern should compile")
    }

    #[rstest]
    fn keys_distinguish_every_component() {
        let en = langid!("en");
        let de = langid!("de");
        let base = CacheKey::new(&en, "a", "x");
        assert_ne!(base, CacheKey::new(&de, "a", "x"));
        assert_ne!(base, CacheKey::new(&en, "b", "x"));
        assert_ne!(base, CacheKey::new(&en, "a", "y"));
        assert_eq!(base, CacheKey::new(&en, "a", "x"));
    }

    #[rstest]
    fn keys_do_not_collide_across_dot_boundaries() {
        let en = langid!("en");
        assert_ne!(CacheKey::new(&en, "a.b", "c"), CacheKey::new(&en, "a", "b.c"));
    }

    #[rstest]
    fn display_joins_components() {
        let key = CacheKey::new(&langid!("en-US"), "greeting", "Hi {name}");
        assert_eq!(key.to_string(), "en-US.greeting.Hi {name}");
    }

    #[rstest]
    fn clones_share_storage() -> Result<(), FormatError> {
        let cache = FormatCache::new();
        let shared = cache.clone();
        let key = CacheKey::new(&langid!("en"), "k", "Hello {name}");
        assert!(!shared.has(&key));

        cache.set(key.clone(), compiled("Hello {name}"));
        assert!(shared.has(&key));
        assert_eq!(shared.len(), 1);

        let entry = shared.get(&key).expect("entry should be shared");
        let output = entry.format(&TranslationValues::new().with("name", "Ana"))?;
        assert_eq!(output, Formatted::Text(String::from("Hello Ana")));
        Ok(())
    }
}
