//! Built-in engine for ICU MessageFormat messages.
//!
//! Supports simple arguments, `number`, `date` and `time` arguments with
//! built-in or named styles, `plural` and `selectordinal` (with `offset:`,
//! `=N` selectors and `#`), `select`, XML-like tags for rich text, and ICU
//! apostrophe quoting. Plural categories come from CLDR data shipped with
//! `intl_pluralrules`. Numbers and built-in date and time styles are
//! rendered with ICU4X data for the locale.

use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use icu::locale::Locale;
use intl_pluralrules::{PluralRuleType, PluralRules};
use unic_langid::LanguageIdentifier;

use super::{CompileError, CompiledMessage, FormatError, MessageCompiler};
use crate::{DateTimeStyle, FormatConfig, Formatted, StyleLength, TranslationValues};

mod ast;
mod date;
mod format;
mod number;
mod parser;

use ast::{DateKind, DateStyle, Node, PluralKind};
use format::Executor;
use parser::Parser;

/// Default [`MessageCompiler`] understanding ICU MessageFormat.
///
/// # Examples
/// ```rust
/// use intl_translator::{FormatConfig, Formatted, IcuCompiler, MessageCompiler, TranslationValues};
/// use unic_langid::langid;
///
/// let compiled = IcuCompiler::new()
///     .compile("{n, plural, one{# item} other{# items}}", &langid!("en"), &FormatConfig::default())
///     .expect("valid pattern");
/// let output = compiled
///     .format(&TranslationValues::new().with("n", 5))
///     .expect("n is supplied");
/// assert_eq!(output, Formatted::Text(String::from("5 items")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuCompiler;

impl IcuCompiler {
    /// Creates the compiler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageCompiler for IcuCompiler {
    fn compile(
        &self,
        pattern: &str,
        locale: &LanguageIdentifier,
        formats: &FormatConfig,
    ) -> Result<Arc<dyn CompiledMessage>, CompileError> {
        let nodes = Parser::new(pattern, formats).parse()?;
        let icu_locale = locale
            .to_string()
            .parse::<Locale>()
            .map_err(|err| CompileError::Engine(format!("unsupported locale `{locale}`: {err:?}")))?;
        let cardinal = Node::uses_plural(&nodes, PluralKind::Cardinal)
            .then(|| plural_rules(locale, PluralKind::Cardinal))
            .flatten();
        let ordinal = Node::uses_plural(&nodes, PluralKind::Ordinal)
            .then(|| plural_rules(locale, PluralKind::Ordinal))
            .flatten();
        let default_date = match formats.date_time(None) {
            Some(DateTimeStyle::Named(format)) => DateStyle::Pattern(format.pattern.clone()),
            _ => DateStyle::Builtin(DateKind::Date, StyleLength::Medium),
        };
        tracing::trace!(%locale, pattern, "compiled ICU message");
        Ok(Arc::new(IcuMessage {
            nodes,
            locale: icu_locale,
            cardinal,
            ordinal,
            default_date,
            zone: formats.time_zone(),
        }))
    }
}

/// A parsed ICU message bound to its locale's rules.
pub(super) struct IcuMessage {
    nodes: Vec<Node>,
    locale: Locale,
    cardinal: Option<PluralRules>,
    ordinal: Option<PluralRules>,
    default_date: DateStyle,
    zone: Option<Tz>,
}

impl CompiledMessage for IcuMessage {
    fn format(&self, values: &TranslationValues) -> Result<Formatted, FormatError> {
        let mut parts = Vec::new();
        Executor::new(self, values).render(&self.nodes, None, &mut parts)?;
        Ok(Formatted::from_parts(parts))
    }
}

impl fmt::Debug for IcuMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuMessage")
            .field("nodes", &self.nodes)
            .field("locale", &self.locale)
            .field("cardinal", &self.cardinal.is_some())
            .field("ordinal", &self.ordinal.is_some())
            .finish_non_exhaustive()
    }
}

/// Loads plural rules, retrying with the bare language and then English.
fn plural_rules(locale: &LanguageIdentifier, kind: PluralKind) -> Option<PluralRules> {
    let language_only = LanguageIdentifier::from_parts(locale.language, None, None, &[]);
    [locale.clone(), language_only, unic_langid::langid!("en")]
        .into_iter()
        .find_map(|candidate| {
            let rule_type = match kind {
                PluralKind::Cardinal => PluralRuleType::CARDINAL,
                PluralKind::Ordinal => PluralRuleType::ORDINAL,
            };
            PluralRules::create(candidate, rule_type).ok()
        })
}
