//! Fluent-backed [`MessageCompiler`].
//!
//! Message text is treated as the value of a single Fluent message, so
//! catalogues can hold Fluent patterns such as
//! `{ $count -> [one] one file *[other] { $count } files }` and still flow
//! through the same resolution, caching and fallback policy as ICU messages.

use std::fmt;
use std::sync::Arc;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use fluent_syntax::parser::ParserError;
use unic_langid::LanguageIdentifier;

use super::{CompileError, CompiledMessage, FormatError, MessageCompiler};
use crate::{FormatConfig, Formatted, TranslationValues, Value};

const MESSAGE_ID: &str = "message";

/// Compiles message text as a Fluent pattern.
///
/// Values reach Fluent as strings or numbers. [`Value::DateTime`] has no
/// Fluent counterpart, so it is passed as its RFC 3339 string in UTC, e.g.
/// `2024-03-01T20:30:00+00:00`; the named formats and time zone of the
/// [`FormatConfig`] do not apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluentCompiler {
    use_isolating: bool,
}

impl FluentCompiler {
    /// Creates a compiler that does not wrap placeables in bidi isolates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            use_isolating: false,
        }
    }

    /// Toggles Unicode bidi isolation around interpolated values.
    #[must_use]
    pub const fn with_isolating(mut self, use_isolating: bool) -> Self {
        self.use_isolating = use_isolating;
        self
    }
}

impl MessageCompiler for FluentCompiler {
    fn compile(
        &self,
        pattern: &str,
        locale: &LanguageIdentifier,
        _formats: &FormatConfig,
    ) -> Result<Arc<dyn CompiledMessage>, CompileError> {
        let resource = FluentResource::try_new(wrap_pattern(pattern))
            .map_err(|(_resource, errors)| syntax_error(&errors))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(self.use_isolating);
        bundle.add_resource(Arc::new(resource)).map_err(|errors| {
            CompileError::Engine(format!("failed to register Fluent pattern: {errors:?}"))
        })?;

        if bundle
            .get_message(MESSAGE_ID)
            .and_then(|message| message.value())
            .is_none()
        {
            return Err(CompileError::Engine(String::from(
                "Fluent pattern has no value",
            )));
        }

        Ok(Arc::new(FluentMessage {
            locale: locale.clone(),
            bundle,
        }))
    }
}

struct FluentMessage {
    locale: LanguageIdentifier,
    bundle: FluentBundle<Arc<FluentResource>>,
}

impl CompiledMessage for FluentMessage {
    fn format(&self, values: &TranslationValues) -> Result<Formatted, FormatError> {
        let args = fluent_args_from(values)?;
        let pattern = self
            .bundle
            .get_message(MESSAGE_ID)
            .and_then(|message| message.value())
            .ok_or_else(|| FormatError::Render(String::from("Fluent pattern has no value")))?;

        let mut errors = Vec::new();
        let rendered = self.bundle.format_pattern(pattern, Some(&args), &mut errors);
        if errors.is_empty() {
            Ok(Formatted::Text(rendered.into_owned()))
        } else {
            Err(FormatError::Render(format!(
                "failed to format Fluent pattern: {errors:?}"
            )))
        }
    }
}

impl fmt::Debug for FluentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentMessage")
            .field("locale", &self.locale)
            .field("bundle", &"<fluent bundle>")
            .finish()
    }
}

/// Reports the first parser error, with its offset relative to `pattern`.
fn syntax_error(errors: &[ParserError]) -> CompileError {
    errors.first().map_or_else(
        || CompileError::Engine(String::from("failed to parse Fluent pattern")),
        |error| CompileError::Syntax {
            offset: error.pos.start.saturating_sub(MESSAGE_ID.len() + 3),
            message: format!("{:?}", error.kind),
        },
    )
}

/// Embeds `pattern` as the value of [`MESSAGE_ID`], indenting continuation
/// lines so multiline select expressions stay inside the message body.
fn wrap_pattern(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + MESSAGE_ID.len() + 8);
    source.push_str(MESSAGE_ID);
    source.push_str(" = ");
    for (index, line) in pattern.lines().enumerate() {
        if index > 0 {
            source.push_str("\n    ");
        }
        source.push_str(line);
    }
    source.push('\n');
    source
}

fn fluent_args_from(values: &TranslationValues) -> Result<FluentArgs<'_>, FormatError> {
    let mut args = FluentArgs::with_capacity(values.len());
    for (name, value) in values.iter() {
        let fluent_value = match value {
            Value::String(text) => FluentValue::from(text.as_str()),
            Value::Integer(number) => FluentValue::from(*number),
            Value::Float(number) => FluentValue::from(*number),
            Value::Bool(flag) => FluentValue::from(if *flag { "true" } else { "false" }),
            Value::DateTime(instant) => FluentValue::from(instant.to_rfc3339()),
            Value::Markup(_) => {
                return Err(FormatError::InvalidValueType {
                    argument: name.to_owned(),
                    expected: "a plain value",
                });
            }
        };
        args.set(name, fluent_value);
    }
    Ok(args)
}
