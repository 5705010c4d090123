//! ICU message translation with cached formatters and typed fallbacks.
//!
//! A [`Translator`] turns dotted keys into localised text. It resolves the
//! key in a [`MessageTree`], compiles the message through a
//! [`MessageCompiler`] (the built-in [`IcuCompiler`] by default), stores the
//! compiled form in a caller-owned [`FormatCache`], and formats it with the
//! call's [`TranslationValues`].
//!
//! Translation never fails outright. Every problem becomes an [`IntlError`]
//! handed to the configured `on_error` hook, and the call returns the text
//! produced by the `get_message_fallback` hook (the key, by default).
//!
//! ```rust
//! use intl_translator::{FormatCache, IntlConfig, MessageTree, TranslationValues, Translator};
//! use unic_langid::langid;
//!
//! let messages = MessageTree::new()
//!     .with("inbox", "{count, plural, one {# message} other {# messages}}");
//! let config = IntlConfig::builder(langid!("en"))
//!     .messages(messages)
//!     .time_zone(chrono_tz::UTC)
//!     .build();
//! let translator = Translator::new(config, &FormatCache::new());
//! let values = TranslationValues::new().with("count", 3);
//! assert_eq!(translator.translate("inbox", Some(&values), None), "3 messages");
//! ```

mod cache;
pub mod compiler;
mod config;
mod context;
pub mod defaults;
mod error;
mod formats;
mod messages;
mod settings;
mod translator;
mod values;

pub use cache::{CacheKey, FormatCache};
#[cfg(feature = "fluent")]
pub use compiler::FluentCompiler;
pub use compiler::{CompileError, CompiledMessage, FormatError, IcuCompiler, MessageCompiler};
pub use config::{ErrorHook, FallbackContext, IntlConfig, IntlConfigBuilder, MessageFallbackHook};
pub use context::{ConfigLoader, TranslationContext};
pub use error::{IntlError, IntlErrorCode, SettingsError};
pub use formats::{
    DateTimeFormat, DateTimeStyle, FormatConfig, Formats, NumberFormat, NumberStyle, StyleLength,
    parse_time_zone,
};
pub use messages::{MessageNode, MessageTree, Resolved, resolve};
pub use settings::{ENV_PREFIX, IntlSettings};
pub use translator::{RawMessage, Translator};
pub use values::{Formatted, MarkupHandler, RichNode, TranslationValues, Value};
