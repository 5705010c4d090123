//! Date and time rendering.
//!
//! Built-in styles go through ICU4X date-time formatters so month names,
//! field order and the 12/24-hour clock follow the locale. Named formats are
//! `strftime` patterns rendered by `chrono`.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use icu::calendar::{Date, Iso};
use icu::datetime::DateTimeFormatter;
use icu::datetime::fieldsets::enums::{DateFieldSet, TimeFieldSet};
use icu::datetime::fieldsets::{self, T};
use icu::datetime::input::{self, Time};
use icu::datetime::options::Length;
use icu::locale::Locale;

use super::ast::{DateKind, DateStyle};
use crate::StyleLength;
use crate::compiler::FormatError;

/// Renders `instant`, shifted into `zone` (UTC when unset), with `style`.
pub(super) fn render_date(
    instant: DateTime<Utc>,
    style: &DateStyle,
    zone: Option<Tz>,
    locale: &Locale,
) -> Result<String, FormatError> {
    match style {
        DateStyle::Builtin(kind, length) => {
            let local = zone.map_or_else(
                || instant.naive_utc(),
                |tz| instant.with_timezone(&tz).naive_local(),
            );
            render_builtin(&local, *kind, *length, locale)
        }
        DateStyle::Pattern(pattern) => render_pattern(instant, pattern, zone),
    }
}

fn render_builtin(
    local: &NaiveDateTime,
    kind: DateKind,
    length: StyleLength,
    locale: &Locale,
) -> Result<String, FormatError> {
    let input = to_icu(local)?;
    let rendered = match kind {
        DateKind::Date => {
            let fields = match length {
                StyleLength::Short => DateFieldSet::YMD(fieldsets::YMD::for_length(Length::Short)),
                StyleLength::Medium => {
                    DateFieldSet::YMD(fieldsets::YMD::for_length(Length::Medium))
                }
                StyleLength::Long => DateFieldSet::YMD(fieldsets::YMD::for_length(Length::Long)),
                StyleLength::Full => DateFieldSet::YMDE(fieldsets::YMDE::for_length(Length::Long)),
            };
            DateTimeFormatter::<DateFieldSet>::try_new(locale.clone().into(), fields)
                .map_err(|err| load_failed(locale, &err))?
                .format(&input)
                .to_string()
        }
        DateKind::Time => {
            let fields = match length {
                StyleLength::Short => T::hm().with_length(Length::Short),
                StyleLength::Medium => T::hms().with_length(Length::Medium),
                StyleLength::Long | StyleLength::Full => T::hms().with_length(Length::Long),
            };
            DateTimeFormatter::<TimeFieldSet>::try_new(locale.clone().into(), TimeFieldSet::T(fields))
                .map_err(|err| load_failed(locale, &err))?
                .format(&input)
                .to_string()
        }
    };
    Ok(rendered)
}

fn to_icu(local: &NaiveDateTime) -> Result<input::DateTime<Iso>, FormatError> {
    let out_of_range = || FormatError::Render(format!("{local} is outside the ISO calendar range"));
    let month = u8::try_from(local.month()).map_err(|_| out_of_range())?;
    let day = u8::try_from(local.day()).map_err(|_| out_of_range())?;
    let hour = u8::try_from(local.hour()).map_err(|_| out_of_range())?;
    let minute = u8::try_from(local.minute()).map_err(|_| out_of_range())?;
    let second = u8::try_from(local.second()).map_err(|_| out_of_range())?;
    let date = Date::try_new_iso(local.year(), month, day).map_err(|_| out_of_range())?;
    let time = Time::try_new(hour, minute, second, 0).map_err(|_| out_of_range())?;
    Ok(input::DateTime { date, time })
}

fn load_failed(locale: &Locale, err: &impl std::fmt::Debug) -> FormatError {
    FormatError::Render(format!("no date-time patterns for `{locale}`: {err:?}"))
}

fn render_pattern(
    instant: DateTime<Utc>,
    pattern: &str,
    zone: Option<Tz>,
) -> Result<String, FormatError> {
    let mut out = String::new();
    let written = match zone {
        Some(tz) => write!(out, "{}", instant.with_timezone(&tz).format(pattern)),
        None => write!(out, "{}", instant.format(pattern)),
    };
    written.map_err(|_| FormatError::Render(format!("unable to render date pattern `{pattern}`")))?;
    Ok(out)
}
