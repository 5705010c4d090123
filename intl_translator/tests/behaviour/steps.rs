//! Steps driving a translator through the translate/fallback flow.

use crate::fixtures::TranslationWorld;
use anyhow::{Context as _, Result, anyhow, ensure};
use intl_translator::{FormatCache, IntlConfig, MessageTree, TranslationValues, Translator};
use intl_translator_test_helpers::text::unquote;
use intl_translator_test_helpers::{CountingCompiler, ErrorLog};
use rstest_bdd_macros::{given, then, when};
use unic_langid::langid;

fn translate(world: &TranslationWorld, key: &str, values: Option<&TranslationValues>) -> Result<()> {
    let text = world
        .translator
        .with_ref(|translator| translator.translate(key, values, None))
        .ok_or_else(|| anyhow!("translator must be initialised"))?;
    world.output.set(text);
    Ok(())
}

#[given("the English demo catalogue")]
fn english_catalogue(world: &TranslationWorld) {
    let messages = MessageTree::new()
        .with("title", "Welcome")
        .with("greeting", "Hello {name}")
        .with(
            "inbox",
            "{count, plural, one {# message} other {# messages}}",
        )
        .with("nav", MessageTree::new().with("home", "Home"));
    let errors = ErrorLog::new();
    let compiler = CountingCompiler::new();
    let config = IntlConfig::builder(langid!("en"))
        .messages(messages)
        .time_zone(chrono_tz::UTC)
        .on_error(errors.hook())
        .compiler(compiler.shared())
        .build();
    world
        .translator
        .set(Translator::new(config, &FormatCache::new()));
    world.errors.set(errors);
    world.compiler.set(compiler);
}

#[when("I translate {key} without values")]
fn translate_plain(world: &TranslationWorld, key: String) -> Result<()> {
    translate(world, unquote(&key), None)
}

#[when("I greet {name} using {key}")]
fn translate_greeting(world: &TranslationWorld, name: String, key: String) -> Result<()> {
    let values = TranslationValues::new().with("name", unquote(&name));
    translate(world, unquote(&key), Some(&values))
}

#[when("I count {count:i64} items using {key}")]
fn translate_count(world: &TranslationWorld, count: i64, key: String) -> Result<()> {
    let values = TranslationValues::new().with("count", count);
    translate(world, unquote(&key), Some(&values))
}

#[then("the translation is {expected}")]
fn assert_translation(world: &TranslationWorld, expected: String) -> Result<()> {
    let actual = world
        .output
        .take()
        .ok_or_else(|| anyhow!("expected a translation"))?;
    let wanted = unquote(&expected);
    ensure!(actual == wanted, "translated {actual:?}; expected {wanted:?}");
    Ok(())
}

#[then("no errors were reported")]
fn assert_no_errors(world: &TranslationWorld) -> Result<()> {
    let codes = world
        .errors
        .with_ref(ErrorLog::codes)
        .ok_or_else(|| anyhow!("error log must be initialised"))?;
    ensure!(codes.is_empty(), "unexpected errors: {codes:?}");
    Ok(())
}

#[then("{count:usize} error with code {code} was reported")]
fn assert_error_code(world: &TranslationWorld, count: usize, code: String) -> Result<()> {
    let codes = world
        .errors
        .with_ref(ErrorLog::codes)
        .ok_or_else(|| anyhow!("error log must be initialised"))?;
    let wanted = unquote(&code);
    ensure!(codes.len() == count, "expected {count} errors, got {codes:?}");
    let first = codes.first().context("no error was recorded")?;
    ensure!(first.as_str() == wanted, "recorded {first}; expected {wanted}");
    Ok(())
}

#[then("the compiler ran {count:usize} times")]
fn assert_compilations(world: &TranslationWorld, count: usize) -> Result<()> {
    let calls = world
        .compiler
        .with_ref(CountingCompiler::calls)
        .ok_or_else(|| anyhow!("compiler must be initialised"))?;
    ensure!(calls == count, "compiler ran {calls} times; expected {count}");
    Ok(())
}
