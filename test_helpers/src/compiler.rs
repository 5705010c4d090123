//! Instrumented message compiler.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use intl_translator::{
    CompileError, CompiledMessage, FormatConfig, IcuCompiler, MessageCompiler,
};
use unic_langid::LanguageIdentifier;

/// Delegates to [`IcuCompiler`] while counting how often it is invoked.
///
/// Clones share the counter, so a test can keep one handle and install the
/// other in a config.
#[derive(Debug, Clone, Default)]
pub struct CountingCompiler {
    inner: IcuCompiler,
    calls: Arc<AtomicUsize>,
}

impl CountingCompiler {
    /// Creates a compiler with a zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `compile` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns a shared handle suitable for `IntlConfigBuilder::compiler`.
    #[must_use]
    pub fn shared(&self) -> Arc<dyn MessageCompiler> {
        Arc::new(self.clone())
    }
}

impl MessageCompiler for CountingCompiler {
    fn compile(
        &self,
        pattern: &str,
        locale: &LanguageIdentifier,
        formats: &FormatConfig,
    ) -> Result<Arc<dyn CompiledMessage>, CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(pattern, locale, formats)
    }
}
