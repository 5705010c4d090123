//! Recursive-descent parser for the supported ICU MessageFormat subset.

use super::ast::{Category, DateKind, DateStyle, Node, PluralKind, PluralOption, PluralSelector};
use crate::compiler::CompileError;
use crate::formats::parse_time_zone;
use crate::{DateTimeStyle, FormatConfig};

/// Where the current run of nodes ends.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Terminator {
    End,
    CloseBrace,
    CloseTag(String),
}

pub(super) struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    formats: &'a FormatConfig,
}

impl<'a> Parser<'a> {
    pub(super) fn new(pattern: &str, formats: &'a FormatConfig) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            formats,
        }
    }

    pub(super) fn parse(mut self) -> Result<Vec<Node>, CompileError> {
        self.parse_nodes(false, &Terminator::End)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CompileError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.error(format!("expected `{expected}`"))),
            None => Err(self.error("unexpected end of message")),
        }
    }

    /// Consumes `keyword` when the input continues with it.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        let matches = self
            .chars
            .get(self.pos..self.pos + len)
            .is_some_and(|window| window.iter().copied().eq(keyword.chars()));
        if matches {
            self.pos += len;
        }
        matches
    }

    /// Reads characters until whitespace or one of `stops`.
    fn word(&mut self, stops: &[char]) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || stops.contains(&ch) {
                break;
            }
            out.push(ch);
            self.pos += 1;
        }
        out
    }

    fn parse_nodes(
        &mut self,
        in_plural: bool,
        until: &Terminator,
    ) -> Result<Vec<Node>, CompileError> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        loop {
            let Some(ch) = self.peek() else {
                if *until != Terminator::End {
                    return Err(self.error("unexpected end of message"));
                }
                break;
            };
            match ch {
                '{' => {
                    flush(&mut text, &mut nodes);
                    nodes.push(self.parse_argument(in_plural)?);
                }
                '}' => match until {
                    Terminator::CloseBrace => {
                        self.pos += 1;
                        break;
                    }
                    // A stray `}` outside any argument is plain text.
                    Terminator::End => {
                        text.push('}');
                        self.pos += 1;
                    }
                    Terminator::CloseTag(_) => return Err(self.error("unmatched `}`")),
                },
                '<' if self.peek_at(1) == Some('/') => {
                    let Terminator::CloseTag(open) = until else {
                        return Err(self.error("closing tag without an opening tag"));
                    };
                    self.pos += 2;
                    let name = self.word(&['>']);
                    if name != *open {
                        return Err(self.error(format!("expected `</{open}>`, found `</{name}>`")));
                    }
                    self.expect('>')?;
                    break;
                }
                '<' if self.peek_at(1).is_some_and(char::is_alphabetic) => {
                    flush(&mut text, &mut nodes);
                    self.pos += 1;
                    let name = self.word(&['>', '/', '{', '}']);
                    self.expect('>')?;
                    let children =
                        self.parse_nodes(in_plural, &Terminator::CloseTag(name.clone()))?;
                    nodes.push(Node::Tag { name, children });
                }
                '#' if in_plural => {
                    flush(&mut text, &mut nodes);
                    self.pos += 1;
                    nodes.push(Node::Pound);
                }
                '\'' => self.parse_apostrophe(in_plural, &mut text),
                _ => {
                    text.push(ch);
                    self.pos += 1;
                }
            }
        }
        flush(&mut text, &mut nodes);
        Ok(nodes)
    }

    /// Handles `''` and quoted literal runs such as `'{braces}'`.
    fn parse_apostrophe(&mut self, in_plural: bool, text: &mut String) {
        self.pos += 1;
        match self.peek() {
            Some('\'') => {
                self.pos += 1;
                text.push('\'');
            }
            Some(next) if matches!(next, '{' | '}' | '<' | '>') || (in_plural && next == '#') => {
                while let Some(ch) = self.bump() {
                    if ch != '\'' {
                        text.push(ch);
                    } else if self.peek() == Some('\'') {
                        self.pos += 1;
                        text.push('\'');
                    } else {
                        break;
                    }
                }
            }
            _ => text.push('\''),
        }
    }

    fn parse_argument(&mut self, in_plural: bool) -> Result<Node, CompileError> {
        self.expect('{')?;
        self.skip_whitespace();
        let argument = self.word(&[',', '}', '{']);
        if argument.is_empty() {
            return Err(self.error("expected an argument name"));
        }
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Node::Argument(argument));
        }
        self.expect(',')?;
        self.skip_whitespace();
        let kind = self.word(&[',', '}', '{']);
        self.skip_whitespace();
        match kind.as_str() {
            "number" => {
                let style = self.parse_style()?;
                self.number_node(argument, style)
            }
            "date" | "time" => {
                let style = self.parse_style()?;
                self.date_time_node(argument, &kind, style)
            }
            "plural" => self.parse_plural(argument, PluralKind::Cardinal),
            "selectordinal" => self.parse_plural(argument, PluralKind::Ordinal),
            "select" => self.parse_select(argument, in_plural),
            "" => Err(self.error("expected an argument type")),
            other => Err(self.error(format!("unsupported argument type `{other}`"))),
        }
    }

    /// Parses the optional `, style` part and the closing brace.
    fn parse_style(&mut self) -> Result<Option<String>, CompileError> {
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(None);
        }
        self.expect(',')?;
        let mut style = String::new();
        loop {
            match self.bump() {
                Some('}') => break,
                Some('{') => return Err(self.error("unexpected `{` in style")),
                Some(ch) => style.push(ch),
                None => return Err(self.error("unexpected end of message")),
            }
        }
        let trimmed = style.trim();
        if trimmed.is_empty() {
            return Err(self.error("expected a style name"));
        }
        Ok(Some(trimmed.to_owned()))
    }

    fn number_node(&self, argument: String, style: Option<String>) -> Result<Node, CompileError> {
        let format = match style {
            None => crate::NumberFormat::default(),
            Some(name) => self
                .formats
                .number(&name)
                .cloned()
                .ok_or(CompileError::UnknownStyle {
                    kind: "number",
                    style: name,
                })?,
        };
        Ok(Node::Number { argument, format })
    }

    fn date_time_node(
        &self,
        argument: String,
        keyword: &str,
        style: Option<String>,
    ) -> Result<Node, CompileError> {
        let kind = if keyword == "date" {
            DateKind::Date
        } else {
            DateKind::Time
        };
        let found = self
            .formats
            .date_time(style.as_deref())
            .ok_or_else(|| CompileError::UnknownStyle {
                kind: kind.name(),
                style: style.clone().unwrap_or_default(),
            })?;
        let (rendering, zone) = match found {
            DateTimeStyle::Builtin(length) => (DateStyle::Builtin(kind, length), None),
            DateTimeStyle::Named(format) => {
                format
                    .validate(style.as_deref().unwrap_or(kind.name()))
                    .map_err(|err| CompileError::Engine(err.to_string()))?;
                let zone = format
                    .time_zone
                    .as_deref()
                    .map(parse_time_zone)
                    .transpose()
                    .map_err(|err| CompileError::Engine(err.to_string()))?;
                (DateStyle::Pattern(format.pattern.clone()), zone)
            }
        };
        Ok(Node::DateTime {
            argument,
            style: rendering,
            zone: zone.or_else(|| self.formats.time_zone()),
        })
    }

    fn parse_plural(&mut self, argument: String, kind: PluralKind) -> Result<Node, CompileError> {
        self.expect(',')?;
        self.skip_whitespace();
        let mut offset = 0;
        if self.eat_keyword("offset:") {
            self.skip_whitespace();
            let digits = self.word(&['{', '}']);
            offset = digits
                .parse::<i64>()
                .map_err(|_| self.error(format!("invalid plural offset `{digits}`")))?;
        }

        let mut options = Vec::new();
        let mut has_other = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let selector_text = self.word(&['{', '}']);
            let selector = if let Some(exact) = selector_text.strip_prefix('=') {
                PluralSelector::Exact(
                    exact
                        .parse::<f64>()
                        .map_err(|_| self.error(format!("invalid exact selector `{selector_text}`")))?,
                )
            } else {
                let category = Category::from_keyword(&selector_text).ok_or_else(|| {
                    self.error(format!("invalid plural selector `{selector_text}`"))
                })?;
                has_other |= category == Category::Other;
                PluralSelector::Category(category)
            };
            self.skip_whitespace();
            self.expect('{')?;
            let body = self.parse_nodes(true, &Terminator::CloseBrace)?;
            options.push(PluralOption { selector, body });
        }

        if !has_other {
            return Err(CompileError::MissingOther { argument });
        }
        Ok(Node::Plural {
            argument,
            kind,
            offset,
            options,
        })
    }

    fn parse_select(&mut self, argument: String, in_plural: bool) -> Result<Node, CompileError> {
        self.expect(',')?;
        let mut options = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let key = self.word(&['{', '}']);
            if key.is_empty() {
                return Err(self.error("expected a select option"));
            }
            self.skip_whitespace();
            self.expect('{')?;
            let body = self.parse_nodes(in_plural, &Terminator::CloseBrace)?;
            options.push((key, body));
        }

        if !options.iter().any(|(key, _)| key == "other") {
            return Err(CompileError::MissingOther { argument });
        }
        Ok(Node::Select { argument, options })
    }
}

fn flush(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Literal(std::mem::take(text)));
    }
}
