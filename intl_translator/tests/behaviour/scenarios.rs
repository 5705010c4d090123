//! Binds the translation feature file to the step registry.

use crate::fixtures::{TranslationWorld, world};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/translation.feature",
    fixtures = [world: TranslationWorld]
);
