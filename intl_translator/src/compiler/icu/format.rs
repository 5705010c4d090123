//! Executes a parsed message against translation values.

use super::IcuMessage;
use super::ast::{Category, Node, PluralKind, PluralSelector};
use super::date::render_date;
use super::number::format_number;
use crate::compiler::FormatError;
use crate::{NumberFormat, RichNode, TranslationValues, Value};

pub(super) struct Executor<'a> {
    message: &'a IcuMessage,
    values: &'a TranslationValues,
}

impl<'a> Executor<'a> {
    pub(super) const fn new(message: &'a IcuMessage, values: &'a TranslationValues) -> Self {
        Self { message, values }
    }

    pub(super) fn render(
        &self,
        nodes: &[Node],
        pound: Option<f64>,
        out: &mut Vec<RichNode>,
    ) -> Result<(), FormatError> {
        for node in nodes {
            match node {
                Node::Literal(text) => push_text(out, text),
                Node::Argument(argument) => {
                    let text = self.simple_argument(argument)?;
                    push_text(out, &text);
                }
                Node::Number { argument, format } => {
                    let number = self.number(argument)?;
                    push_text(out, &self.number_text(number, format)?);
                }
                Node::DateTime {
                    argument,
                    style,
                    zone,
                } => {
                    let instant = match self.value(argument)? {
                        Value::DateTime(instant) => *instant,
                        _ => return Err(invalid(argument, "a date-time")),
                    };
                    push_text(
                        out,
                        &render_date(instant, style, *zone, &self.message.locale)?,
                    );
                }
                Node::Plural {
                    argument,
                    kind,
                    offset,
                    options,
                } => {
                    let number = self.number(argument)?;
                    let adjusted = minus_offset(number, *offset);
                    let category = self.category(*kind, adjusted);
                    let chosen = options
                        .iter()
                        .find(|option| {
                            matches!(option.selector, PluralSelector::Exact(exact) if same_number(exact, number))
                        })
                        .or_else(|| {
                            options
                                .iter()
                                .find(|option| option.selector == PluralSelector::Category(category))
                        })
                        .or_else(|| {
                            options.iter().find(|option| {
                                option.selector == PluralSelector::Category(Category::Other)
                            })
                        });
                    if let Some(option) = chosen {
                        self.render(&option.body, Some(adjusted), out)?;
                    }
                }
                Node::Select { argument, options } => {
                    let key = self
                        .value(argument)?
                        .select_key()
                        .ok_or_else(|| invalid(argument, "a selectable value"))?;
                    let chosen = options
                        .iter()
                        .find(|(option, _)| *option == key)
                        .or_else(|| options.iter().find(|(option, _)| option == "other"));
                    if let Some((_, body)) = chosen {
                        self.render(body, pound, out)?;
                    }
                }
                Node::Pound => {
                    if let Some(number) = pound {
                        push_text(out, &self.number_text(number, &NumberFormat::default())?);
                    } else {
                        push_text(out, "#");
                    }
                }
                Node::Tag { name, children } => {
                    let handler = match self.values.get(name) {
                        Some(Value::Markup(handler)) => handler,
                        Some(_) => return Err(invalid(name, "a markup handler")),
                        None => return Err(FormatError::MissingMarkup { tag: name.clone() }),
                    };
                    let mut inner = Vec::new();
                    self.render(children, pound, &mut inner)?;
                    match (handler.as_ref())(inner) {
                        RichNode::Text(text) => push_text(out, &text),
                        element @ RichNode::Element { .. } => out.push(element),
                    }
                }
            }
        }
        Ok(())
    }

    fn value(&self, argument: &str) -> Result<&'a Value, FormatError> {
        self.values
            .get(argument)
            .ok_or_else(|| FormatError::MissingValue {
                argument: argument.to_owned(),
            })
    }

    fn number(&self, argument: &str) -> Result<f64, FormatError> {
        self.value(argument)?
            .as_number()
            .ok_or_else(|| invalid(argument, "a number"))
    }

    fn number_text(&self, number: f64, format: &NumberFormat) -> Result<String, FormatError> {
        format_number(number, format, &self.message.locale)
    }

    fn simple_argument(&self, argument: &str) -> Result<String, FormatError> {
        match self.value(argument)? {
            Value::String(text) => Ok(text.clone()),
            Value::Integer(number) => Ok(number.to_string()),
            Value::Float(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            Value::DateTime(instant) => render_date(
                *instant,
                &self.message.default_date,
                self.message.zone,
                &self.message.locale,
            ),
            Value::Markup(_) => Err(invalid(argument, "a plain value")),
        }
    }

    fn category(&self, kind: PluralKind, number: f64) -> Category {
        let rules = match kind {
            PluralKind::Cardinal => self.message.cardinal.as_ref(),
            PluralKind::Ordinal => self.message.ordinal.as_ref(),
        };
        rules
            .and_then(|rules| rules.select(number).ok())
            .map_or(Category::Other, Category::from)
    }
}

fn push_text(out: &mut Vec<RichNode>, text: &str) {
    if let Some(RichNode::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(RichNode::Text(text.to_owned()));
    }
}

fn invalid(argument: &str, expected: &'static str) -> FormatError {
    FormatError::InvalidValueType {
        argument: argument.to_owned(),
        expected,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "plural offsets subtract a small integer from the operand"
)]
fn minus_offset(number: f64, offset: i64) -> f64 {
    number - offset as f64
}

#[expect(clippy::float_cmp, reason = "exact selectors match literal values")]
fn same_number(left: f64, right: f64) -> bool {
    left == right
}
