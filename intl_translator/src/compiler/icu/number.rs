//! Locale-aware decimal rendering backed by ICU4X.

use fixed_decimal::{Decimal, FloatPrecision, SignedRoundingMode, UnsignedRoundingMode};
use icu::decimal::DecimalFormatter;
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::locale::Locale;

use crate::compiler::FormatError;
use crate::{NumberFormat, NumberStyle};

/// Renders `value` with `format` using the separators and grouping of
/// `locale`.
///
/// Rounding keeps at most `maximum_fraction_digits`, with ties away from
/// zero, then trims trailing zeros down to `minimum_fraction_digits`.
pub(super) fn format_number(
    value: f64,
    format: &NumberFormat,
    locale: &Locale,
) -> Result<String, FormatError> {
    let suffix = match format.style {
        NumberStyle::Decimal => "",
        NumberStyle::Percent => "%",
    };
    if value.is_nan() {
        return Ok(String::from("NaN"));
    }
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return Ok(format!("{sign}∞{suffix}"));
    }

    let mut decimal = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)
        .map_err(|err| FormatError::Render(format!("unable to render {value}: {err:?}")))?;
    if format.style == NumberStyle::Percent {
        decimal.multiply_pow10(2);
    }
    let max = i16::from(format.maximum_fraction_digits.max(format.minimum_fraction_digits));
    let min = i16::from(format.minimum_fraction_digits);
    if *decimal.magnitude_range().start() < -max {
        decimal.round_with_mode(
            -max,
            SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
        );
    }
    decimal.trim_end();
    decimal.pad_end(-min);

    let mut options = DecimalFormatterOptions::default();
    if !format.use_grouping {
        options.grouping_strategy = Some(GroupingStrategy::Never);
    }
    let formatter = DecimalFormatter::try_new(locale.clone().into(), options).map_err(|err| {
        FormatError::Render(format!("no decimal symbols for `{locale}`: {err:?}"))
    })?;
    Ok(format!("{}{suffix}", formatter.format(&decimal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use icu::locale::locale;
    use rstest::rstest;

    fn english(value: f64, format: &NumberFormat) -> String {
        format_number(value, format, &locale!("en")).expect("finite values render")
    }

    #[rstest]
    #[case(1234.0, "1,234")]
    #[case(1_234_567.891, "1,234,567.891")]
    #[case(0.5, "0.5")]
    #[case(-42.0, "-42")]
    #[case(100.0, "100")]
    #[case(0.0005, "0.001")]
    #[case(999.9996, "1,000")]
    fn renders_english_decimals(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(english(value, &NumberFormat::default()), expected);
    }

    #[rstest]
    fn integer_style_rounds_ties_away_from_zero() {
        assert_eq!(english(1234.5, &NumberFormat::integer()), "1,235");
        assert_eq!(english(-2.5, &NumberFormat::integer()), "-3");
    }

    #[rstest]
    #[case(locale!("de-DE"), "1.234.567,5")]
    #[case(locale!("en-IN"), "12,34,567.5")]
    #[case(locale!("de-CH"), "1’234’567.5")]
    fn follows_cldr_separators_and_grouping(#[case] locale: Locale, #[case] expected: &str) {
        let rendered = format_number(1_234_567.5, &NumberFormat::default(), &locale)
            .expect("finite values render");
        assert_eq!(rendered, expected);
    }

    #[rstest]
    fn percent_scales_and_rounds() {
        assert_eq!(english(0.256, &NumberFormat::percent()), "26%");
    }

    #[rstest]
    fn pads_to_minimum_fraction_digits() {
        let format = NumberFormat {
            minimum_fraction_digits: 2,
            maximum_fraction_digits: 2,
            use_grouping: false,
            ..NumberFormat::default()
        };
        assert_eq!(english(1500.0, &format), "1500.00");
    }

    #[rstest]
    fn non_finite_values_skip_the_formatter() {
        assert_eq!(english(f64::NAN, &NumberFormat::default()), "NaN");
        assert_eq!(english(f64::NEG_INFINITY, &NumberFormat::percent()), "-∞%");
    }
}
