//! End-to-end translation behaviour through the public API.

use anyhow::{Result, ensure};
use std::sync::Arc;

use intl_translator::{
    FluentCompiler, FormatCache, Formatted, IntlConfig, IntlErrorCode, MessageNode, MessageTree,
    RichNode, TranslationContext, TranslationValues, Translator, Value,
};
use intl_translator_test_helpers::text::strip_isolates;
use intl_translator_test_helpers::{CountingCompiler, ErrorLog};
use rstest::{fixture, rstest};
use unic_langid::langid;

struct Setup {
    errors: ErrorLog,
    compiler: CountingCompiler,
    translator: Translator,
}

#[fixture]
fn setup() -> Setup {
    let messages = MessageTree::new()
        .with("greeting", "Hello {name}")
        .with("plain", "Nothing to see")
        .with("items", "{n, plural, one {# item} other {# items}}")
        .with("a", MessageTree::new().with("b", "x"))
        .with("list", vec![MessageNode::from("first")])
        .with("terms", "Accept the <link>terms</link>")
        .with("joined", "{first} {last}");
    let errors = ErrorLog::new();
    let compiler = CountingCompiler::new();
    let config = IntlConfig::builder(langid!("en"))
        .messages(messages)
        .time_zone(chrono_tz::UTC)
        .on_error(errors.hook())
        .compiler(compiler.shared())
        .build();
    Setup {
        errors,
        compiler,
        translator: Translator::new(config, &FormatCache::new()),
    }
}

#[rstest]
fn greeting_interpolates(setup: Setup) -> Result<()> {
    let values = TranslationValues::new().with("name", "Ana");
    let text = setup.translator.translate("greeting", Some(&values), None);
    ensure!(text == "Hello Ana", "got {text:?}");
    ensure!(setup.errors.is_empty());
    Ok(())
}

#[rstest]
fn empty_catalogue_falls_back_with_one_error() -> Result<()> {
    let errors = ErrorLog::new();
    let config = IntlConfig::builder(langid!("en"))
        .messages(MessageTree::new())
        .time_zone(chrono_tz::UTC)
        .on_error(errors.hook())
        .build();
    let translator = Translator::new(config, &FormatCache::new());
    ensure!(translator.translate("missing", None, None) == "missing");
    ensure!(errors.codes() == vec![IntlErrorCode::MissingMessage]);
    Ok(())
}

#[rstest]
#[case("a", IntlErrorCode::InsufficientPath)]
#[case("list", IntlErrorCode::InvalidMessage)]
#[case("nope", IntlErrorCode::MissingMessage)]
fn unusable_leaves_fall_back(
    setup: Setup,
    #[case] key: &str,
    #[case] code: IntlErrorCode,
) -> Result<()> {
    let text = setup.translator.translate(key, None, None);
    ensure!(text == key, "got {text:?}");
    ensure!(setup.errors.codes() == vec![code], "got {:?}", setup.errors.codes());
    Ok(())
}

#[rstest]
fn nested_leaf_resolves(setup: Setup) {
    assert_eq!(setup.translator.translate("a.b", None, None), "x");
    assert_eq!(setup.translator.with_namespace("a").translate("b", None, None), "x");
}

#[rstest]
fn plain_text_never_compiles(setup: Setup) {
    for _ in 0..3 {
        assert_eq!(setup.translator.translate("plain", None, None), "Nothing to see");
    }
    assert_eq!(setup.compiler.calls(), 0);
}

#[rstest]
fn same_triple_compiles_once(setup: Setup) {
    for n in [1, 2, 5, 1] {
        let values = TranslationValues::new().with("n", n);
        let text = setup.translator.translate("items", Some(&values), None);
        let expected = if n == 1 {
            String::from("1 item")
        } else {
            format!("{n} items")
        };
        assert_eq!(text, expected);
    }
    assert_eq!(setup.compiler.calls(), 1);
    assert_eq!(setup.translator.cache().len(), 1);
}

#[rstest]
fn missing_values_report_formatting_errors(setup: Setup) {
    let values = TranslationValues::new().with("first", "Ada");
    assert_eq!(setup.translator.translate("joined", Some(&values), None), "joined");
    assert_eq!(setup.errors.codes(), vec![IntlErrorCode::FormattingError]);
}

#[rstest]
fn rich_text_produces_keyed_elements(setup: Setup) {
    let values = TranslationValues::new().with(
        "link",
        Value::markup(|children| RichNode::element("a", children)),
    );
    let rich = setup.translator.rich("terms", Some(&values), None);
    assert_eq!(
        rich,
        Formatted::Rich(vec![
            RichNode::text("Accept the "),
            RichNode::Element {
                tag: String::from("a"),
                key: Some(String::from("link0")),
                children: vec![RichNode::text("terms")],
            },
        ])
    );
    assert_eq!(setup.translator.translate("terms", Some(&values), None), "terms");
    assert_eq!(setup.errors.codes(), vec![IntlErrorCode::InvalidMessage]);
}

#[rstest]
fn translators_are_shareable_across_threads(setup: Setup) {
    let handles: Vec<_> = ["Ana", "Bo", "Cy", "Di"]
        .into_iter()
        .map(|name| {
            let translator = setup.translator.clone();
            std::thread::spawn(move || {
                let values = TranslationValues::new().with("name", name);
                translator.translate("greeting", Some(&values), None)
            })
        })
        .collect();
    for handle in handles {
        let text = handle.join().expect("thread should not panic");
        assert!(text.starts_with("Hello "));
    }
    assert!(setup.compiler.calls() >= 1);
    assert_eq!(setup.translator.cache().len(), 1);
}

#[rstest]
fn context_memoises_per_locale() {
    let compiler = CountingCompiler::new();
    let shared = compiler.shared();
    let context = TranslationContext::new(move |locale| {
        IntlConfig::builder(locale.clone())
            .messages(MessageTree::new().with("n", "{n, number}"))
            .time_zone(chrono_tz::UTC)
            .compiler(Arc::clone(&shared))
            .build()
    });
    let values = TranslationValues::new().with("n", 1_234_567.5);
    let en = context.translator(&langid!("en"));
    let de = context.translator(&langid!("de"));
    assert_eq!(en.translate("n", Some(&values), None), "1,234,567.5");
    assert_eq!(de.translate("n", Some(&values), None), "1.234.567,5");
    assert_eq!(
        context.translator(&langid!("de")).translate("n", Some(&values), None),
        "1.234.567,5"
    );
    assert_eq!(compiler.calls(), 2);
    assert_eq!(context.cache().len(), 2);
}

#[rstest]
fn fluent_compiler_formats_fluent_patterns() {
    let errors = ErrorLog::new();
    let config = IntlConfig::builder(langid!("en"))
        .messages(MessageTree::new().with("hello", "Hello, { $name }!"))
        .time_zone(chrono_tz::UTC)
        .on_error(errors.hook())
        .compiler(Arc::new(FluentCompiler::new().with_isolating(true)))
        .build();
    let translator = Translator::new(config, &FormatCache::new());
    let values = TranslationValues::new().with("name", "Ana");
    let text = translator.translate("hello", Some(&values), None);
    assert_ne!(text, "Hello, Ana!");
    assert_eq!(strip_isolates(&text), "Hello, Ana!");
    assert!(errors.is_empty());
}
