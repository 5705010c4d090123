//! Named number and date-time formats.
//!
//! [`Formats`] is what callers configure: globally on the translator and per
//! call. Before compiling, the two are merged and turned into a
//! [`FormatConfig`], which adds the built-in ICU styles and the configured
//! time zone.

use std::collections::BTreeMap;

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Rendering style for a number format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    /// Plain decimal number.
    #[default]
    Decimal,
    /// Multiplied by 100 and suffixed with `%`.
    Percent,
}

/// Options for rendering a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Rendering style.
    pub style: NumberStyle,
    /// Fewest fraction digits to print, padding with zeros.
    pub minimum_fraction_digits: u8,
    /// Most fraction digits to print, rounding half away from zero.
    pub maximum_fraction_digits: u8,
    /// Whether to insert locale grouping separators.
    pub use_grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormat {
    /// Whole numbers only.
    #[must_use]
    pub fn integer() -> Self {
        Self {
            maximum_fraction_digits: 0,
            ..Self::default()
        }
    }

    /// Percentages without fraction digits.
    #[must_use]
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            maximum_fraction_digits: 0,
            ..Self::default()
        }
    }
}

/// A `strftime`-style pattern with an optional zone override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormat {
    /// Pattern understood by `chrono`, e.g. `%Y-%m-%d`.
    pub pattern: String,
    /// IANA zone overriding the translator's time zone for this format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateTimeFormat {
    /// Creates a format from a pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            time_zone: None,
        }
    }

    /// Checks the pattern and zone.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Format`] when the pattern contains an unknown
    /// specifier and [`SettingsError::TimeZone`] for an unknown zone.
    pub fn validate(&self, name: &str) -> Result<(), SettingsError> {
        if StrftimeItems::new(&self.pattern).any(|item| matches!(item, Item::Error)) {
            return Err(SettingsError::Format {
                name: name.to_owned(),
                message: format!("unsupported pattern `{}`", self.pattern),
            });
        }
        if let Some(zone) = &self.time_zone {
            parse_time_zone(zone)?;
        }
        Ok(())
    }
}

/// Named formats supplied globally or per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    /// Number formats addressed as `{arg, number, name}`.
    pub number: BTreeMap<String, NumberFormat>,
    /// Date-time formats addressed as `{arg, date, name}` or `{arg, time, name}`.
    pub date_time: BTreeMap<String, DateTimeFormat>,
}

impl Formats {
    /// Registers a number format, builder style.
    #[must_use]
    pub fn with_number(mut self, name: impl Into<String>, format: NumberFormat) -> Self {
        self.number.insert(name.into(), format);
        self
    }

    /// Registers a date-time format, builder style.
    #[must_use]
    pub fn with_date_time(mut self, name: impl Into<String>, format: DateTimeFormat) -> Self {
        self.date_time.insert(name.into(), format);
        self
    }

    /// Returns `self` with `overrides` layered on top, name by name.
    #[must_use]
    pub fn merged(&self, overrides: Option<&Self>) -> Self {
        let mut merged = self.clone();
        if let Some(extra) = overrides {
            merged
                .number
                .extend(extra.number.iter().map(|(k, v)| (k.clone(), v.clone())));
            merged
                .date_time
                .extend(extra.date_time.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Validates every date-time format.
    ///
    /// # Errors
    ///
    /// Propagates the first [`DateTimeFormat::validate`] failure.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.date_time
            .iter()
            .try_for_each(|(name, format)| format.validate(name))
    }
}

/// Length of a built-in `date` or `time` style, rendered with CLDR data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleLength {
    /// `short`, e.g. `3/2/24` or `5:30 AM` in English.
    Short,
    /// `medium`, the default when an argument names no style.
    Medium,
    /// `long`, with the month spelled out.
    Long,
    /// `full`, adding the weekday to dates.
    Full,
}

impl StyleLength {
    /// Maps an ICU style keyword to its length.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// How a `date` or `time` argument is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeStyle<'a> {
    /// A built-in, locale-aware style.
    Builtin(StyleLength),
    /// A named `strftime` pattern registered in [`Formats`].
    Named(&'a DateTimeFormat),
}

/// Everything a compiler needs to render number, date and time arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    number: BTreeMap<String, NumberFormat>,
    date_time: BTreeMap<String, DateTimeFormat>,
    time_zone: Option<Tz>,
}

impl FormatConfig {
    /// Combines the built-in ICU styles with `formats` and the time zone.
    ///
    /// Named date-time formats serve both `date` and `time` arguments and
    /// shadow the built-in `short`, `medium`, `long` and `full` styles.
    #[must_use]
    pub fn new(formats: &Formats, time_zone: Option<Tz>) -> Self {
        let mut number = BTreeMap::from([
            (String::from("integer"), NumberFormat::integer()),
            (String::from("percent"), NumberFormat::percent()),
        ]);
        number.extend(formats.number.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            number,
            date_time: formats.date_time.clone(),
            time_zone,
        }
    }

    /// Number format registered under `name`.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<&NumberFormat> {
        self.number.get(name)
    }

    /// Style of a `date` or `time` argument named `name`; `None` selects
    /// `medium`.
    #[must_use]
    pub fn date_time(&self, name: Option<&str>) -> Option<DateTimeStyle<'_>> {
        let name = name.unwrap_or("medium");
        self.date_time.get(name).map_or_else(
            || StyleLength::from_keyword(name).map(DateTimeStyle::Builtin),
            |format| Some(DateTimeStyle::Named(format)),
        )
    }

    /// Zone date-times are rendered in, absent a per-format override.
    #[must_use]
    pub const fn time_zone(&self) -> Option<Tz> {
        self.time_zone
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(&Formats::default(), None)
    }
}

/// Parses an IANA zone name.
///
/// # Errors
///
/// Returns [`SettingsError::TimeZone`] for names `chrono-tz` does not know.
pub fn parse_time_zone(name: &str) -> Result<Tz, SettingsError> {
    name.parse::<Tz>().map_err(|err| SettingsError::TimeZone {
        time_zone: name.to_owned(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    //! Tests for format merging and validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn call_formats_override_by_name() {
        let global = Formats::default()
            .with_number("precise", NumberFormat::default())
            .with_date_time("day", DateTimeFormat::new("%d"));
        let call = Formats::default().with_date_time("day", DateTimeFormat::new("%e"));
        let merged = global.merged(Some(&call));
        assert_eq!(merged.number.len(), 1);
        assert_eq!(
            merged.date_time.get("day").map(|f| f.pattern.as_str()),
            Some("%e")
        );
    }

    #[rstest]
    fn named_formats_shadow_builtin_styles() {
        let formats = Formats::default()
            .with_date_time("iso", DateTimeFormat::new("%Y-%m-%d"))
            .with_date_time("long", DateTimeFormat::new("%d %B"));
        let config = FormatConfig::new(&formats, None);
        assert!(matches!(
            config.date_time(Some("iso")),
            Some(DateTimeStyle::Named(format)) if format.pattern == "%Y-%m-%d"
        ));
        assert!(matches!(
            config.date_time(Some("long")),
            Some(DateTimeStyle::Named(format)) if format.pattern == "%d %B"
        ));
        assert_eq!(
            config.date_time(None),
            Some(DateTimeStyle::Builtin(StyleLength::Medium))
        );
        assert_eq!(config.date_time(Some("weekly")), None);
        assert!(config.number("integer").is_some());
    }

    #[rstest]
    fn invalid_patterns_fail_validation() {
        let formats = Formats::default().with_date_time("bad", DateTimeFormat::new("%Q"));
        assert!(matches!(
            formats.validate(),
            Err(SettingsError::Format { name, .. }) if name == "bad"
        ));
    }

    #[rstest]
    #[case("Europe/Berlin", true)]
    #[case("Mars/Olympus", false)]
    fn parses_known_zones(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(parse_time_zone(name).is_ok(), ok);
    }
}
