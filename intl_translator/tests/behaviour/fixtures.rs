//! Shared fixtures for the behavioural scenarios.

use intl_translator::Translator;
use intl_translator_test_helpers::{CountingCompiler, ErrorLog};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Scenario state shared between steps.
#[derive(Debug, Default, ScenarioState)]
pub struct TranslationWorld {
    pub translator: Slot<Translator>,
    pub errors: Slot<ErrorLog>,
    pub compiler: Slot<CountingCompiler>,
    pub output: Slot<String>,
}

/// Creates a clean state for each scenario.
#[fixture]
pub fn world() -> TranslationWorld {
    TranslationWorld::default()
}
