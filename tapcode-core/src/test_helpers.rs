//! Test helpers shared by unit and integration tests.
//!
//! Small constructors for typing contexts and built-in language definitions
//! so scoring tests read as scenarios rather than setup.

use crate::catalog::{self, LanguageDefinition};
use crate::context::TypingContext;
use crate::scoring::Prediction;

/// Context with the cursor at the end of `line`.
pub fn ctx(line: &str) -> TypingContext {
    TypingContext::extract(line, line.len())
}

/// The built-in Python definition, cloned so tests can tweak it.
pub fn python() -> LanguageDefinition {
    language("python")
}

/// The built-in C++ definition.
pub fn cpp() -> LanguageDefinition {
    language("cpp")
}

/// The built-in JavaScript definition.
pub fn javascript() -> LanguageDefinition {
    language("javascript")
}

fn language(key: &str) -> LanguageDefinition {
    catalog::builtin().language(key).cloned().expect("built-in language should exist")
}

/// Button labels of `predictions`, in rank order.
pub fn labels(predictions: &[Prediction]) -> Vec<String> {
    predictions.iter().map(|p| p.button.label.clone()).collect()
}
