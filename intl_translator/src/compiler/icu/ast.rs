//! Parsed form of an ICU message, with styles already resolved.

use chrono_tz::Tz;
use intl_pluralrules::PluralCategory;

use crate::{NumberFormat, StyleLength};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Literal(String),
    Argument(String),
    Number {
        argument: String,
        format: NumberFormat,
    },
    DateTime {
        argument: String,
        style: DateStyle,
        zone: Option<Tz>,
    },
    Plural {
        argument: String,
        kind: PluralKind,
        offset: i64,
        options: Vec<PluralOption>,
    },
    Select {
        argument: String,
        options: Vec<(String, Vec<Node>)>,
    },
    /// `#` inside a plural branch.
    Pound,
    Tag {
        name: String,
        children: Vec<Node>,
    },
}

/// Whether a built-in style renders the date or the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DateKind {
    Date,
    Time,
}

impl DateKind {
    pub(super) const fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DateStyle {
    /// Locale-aware CLDR pattern of the given length.
    Builtin(DateKind, StyleLength),
    /// `strftime` pattern from a named format.
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct PluralOption {
    pub(super) selector: PluralSelector,
    pub(super) body: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PluralSelector {
    Exact(f64),
    Category(Category),
}

impl Node {
    /// Reports whether any node in `nodes` selects with `kind` rules.
    pub(super) fn uses_plural(nodes: &[Self], kind: PluralKind) -> bool {
        nodes.iter().any(|node| match node {
            Self::Plural {
                kind: node_kind,
                options,
                ..
            } => {
                *node_kind == kind
                    || options
                        .iter()
                        .any(|option| Self::uses_plural(&option.body, kind))
            }
            Self::Select { options, .. } => options
                .iter()
                .any(|(_, body)| Self::uses_plural(body, kind)),
            Self::Tag { children, .. } => Self::uses_plural(children, kind),
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PluralKind {
    Cardinal,
    Ordinal,
}

/// CLDR plural category named by a branch selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Category {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Category {
    pub(super) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl From<PluralCategory> for Category {
    fn from(value: PluralCategory) -> Self {
        match value {
            PluralCategory::ZERO => Self::Zero,
            PluralCategory::ONE => Self::One,
            PluralCategory::TWO => Self::Two,
            PluralCategory::FEW => Self::Few,
            PluralCategory::MANY => Self::Many,
            PluralCategory::OTHER => Self::Other,
        }
    }
}
