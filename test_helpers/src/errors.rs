//! Capture of translation errors reported through `on_error`.

use std::sync::Arc;

use intl_translator::{IntlError, IntlErrorCode};
use parking_lot::Mutex;

/// Shared, clonable record of every error a translator reported.
///
/// # Examples
///
/// ```
/// use intl_translator::{FormatCache, IntlConfig, IntlErrorCode, MessageTree, Translator};
/// use intl_translator_test_helpers::ErrorLog;
/// use unic_langid::langid;
///
/// let log = ErrorLog::new();
/// let config = IntlConfig::builder(langid!("en"))
///     .messages(MessageTree::new())
///     .on_error(log.hook())
///     .build();
/// let translator = Translator::new(config, &FormatCache::new());
/// assert_eq!(translator.translate("missing", None, None), "missing");
/// assert_eq!(log.codes(), vec![IntlErrorCode::MissingMessage]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    entries: Arc<Mutex<Vec<IntlError>>>,
}

impl ErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a hook that appends to this log.
    #[must_use]
    pub fn hook(&self) -> impl Fn(&IntlError) + Send + Sync + 'static {
        let entries = Arc::clone(&self.entries);
        move |error: &IntlError| entries.lock().push(error.clone())
    }

    /// Codes of the recorded errors, oldest first.
    #[must_use]
    pub fn codes(&self) -> Vec<IntlErrorCode> {
        self.entries.lock().iter().map(IntlError::code).collect()
    }

    /// Copies of the recorded errors.
    #[must_use]
    pub fn errors(&self) -> Vec<IntlError> {
        self.entries.lock().clone()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
