//! Catalogues deserialised from JSON and TOML feed translators unchanged.

use anyhow::Result;
use intl_translator::{
    FormatCache, Formats, IntlConfig, MessageTree, RawMessage, Resolved, TranslationValues,
    Translator,
};
use rstest::rstest;
use unic_langid::langid;

fn translator(messages: MessageTree) -> Translator {
    let config = IntlConfig::builder(langid!("en"))
        .messages(messages)
        .time_zone(chrono_tz::UTC)
        .on_error(|_| {})
        .build();
    Translator::new(config, &FormatCache::new())
}

#[rstest]
fn json_catalogue_translates() -> Result<()> {
    let messages = MessageTree::from_json_str(
        r#"{
            "Auth": {
                "login": "Sign in",
                "welcome": "Welcome back, {name}!"
            },
            "Cart.total": "Total: {amount, number, integer}",
            "tips": ["one", "two"]
        }"#,
    )?;
    let t = translator(messages);
    assert_eq!(t.translate("Auth.login", None, None), "Sign in");
    let values = TranslationValues::new().with("name", "Ana");
    assert_eq!(
        t.with_namespace("Auth").translate("welcome", Some(&values), None),
        "Welcome back, Ana!"
    );
    let values = TranslationValues::new().with("amount", 1999.6);
    assert_eq!(t.translate("Cart.total", Some(&values), None), "Total: 2,000");
    assert!(matches!(
        t.raw("tips"),
        RawMessage::Resolved(Resolved::UnsupportedArray(items)) if items.len() == 2
    ));
    Ok(())
}

#[rstest]
fn toml_catalogue_translates() -> Result<()> {
    let messages = MessageTree::from_toml_str(
        r#"
        [Inbox]
        title = "Inbox"
        unread = "{count, plural, =0 {No new mail} one {# new message} other {# new messages}}"
        "#,
    )?;
    let t = translator(messages).with_namespace("Inbox");
    assert_eq!(t.translate("title", None, None), "Inbox");
    for (count, expected) in [(0, "No new mail"), (1, "1 new message"), (7, "7 new messages")] {
        let values = TranslationValues::new().with("count", count);
        assert_eq!(t.translate("unread", Some(&values), None), expected);
    }
    Ok(())
}

#[rstest]
fn named_formats_apply_from_config() -> Result<()> {
    let formats: Formats = serde_json::from_str(
        r#"{
            "number": { "precise": { "minimum_fraction_digits": 2, "maximum_fraction_digits": 2 } },
            "date_time": { "stamp": { "pattern": "%Y-%m-%d %H:%M", "time_zone": "Asia/Tokyo" } }
        }"#,
    )?;
    let config = IntlConfig::builder(langid!("en"))
        .messages(
            MessageTree::new()
                .with("price", "{value, number, precise}")
                .with("sent", "Sent {at, date, stamp}"),
        )
        .formats(formats)
        .time_zone(chrono_tz::UTC)
        .build();
    let t = Translator::new(config, &FormatCache::new());
    let values = TranslationValues::new().with("value", 1.23456);
    assert_eq!(t.translate("price", Some(&values), None), "1.23");
    let at = chrono::DateTime::parse_from_rfc3339("2024-05-01T23:30:00Z")?.to_utc();
    let values = TranslationValues::new().with("at", at);
    assert_eq!(t.translate("sent", Some(&values), None), "Sent 2024-05-02 08:30");
    Ok(())
}
