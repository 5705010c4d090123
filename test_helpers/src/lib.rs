//! Test helpers shared across crates.
//!
//! Provides an error log that plugs into `on_error`, a compiler wrapper that
//! counts compilations, `figment::Jail` plumbing, and text normalisation for
//! behavioural steps.

pub mod compiler;
pub mod errors;
pub mod jail;
pub mod text;

pub use compiler::CountingCompiler;
pub use errors::ErrorLog;
pub use jail::{load_settings, with_jail};
