//! Text normalisation for behavioural step arguments.

/// Strips surrounding whitespace and one layer of matching quotes.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|inner| inner.strip_suffix(quote))
        })
        .unwrap_or(trimmed)
}

/// Removes the bidi isolation marks Fluent wraps around placeables.
#[must_use]
pub fn strip_isolates(value: &str) -> String {
    value.replace(['\u{2068}', '\u{2069}'], "")
}

#[cfg(test)]
mod tests {
    use super::{strip_isolates, unquote};

    #[test]
    fn unquote_handles_both_quote_styles() {
        assert_eq!(unquote(" \"greeting\" "), "greeting");
        assert_eq!(unquote("'nav.home'"), "nav.home");
        assert_eq!(unquote("\"mismatched'"), "\"mismatched'");
    }

    #[test]
    fn strip_isolates_keeps_visible_text() {
        assert_eq!(strip_isolates("Hi \u{2068}Ana\u{2069}!"), "Hi Ana!");
    }
}
