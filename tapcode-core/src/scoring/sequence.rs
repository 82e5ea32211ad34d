//! Affinity-sequence scoring, the first rule of the cascade.
//!
//! The language catalog carries per-word affinity rows ("after `var` comes
//! `=`, then `+=`, ..."). The lookup key is the operator still pending at
//! the end of the line if there is one, otherwise the case-folded last word.
//! Position in the row sets the score: entry `i` scores `1.0 - 0.1 * i`.

use crate::catalog::LanguageDefinition;
use crate::context::TypingContext;
use crate::template;

/// Assignment-family operators that can be pending at the end of a line.
/// Longest first so `+=` wins over its `=` suffix.
const PENDING_OPERATORS: &[&str] = &["+=", "-=", "*=", "/=", "%=", "="];

#[allow(clippy::cast_precision_loss)]
pub(crate) fn score(
    context: &TypingContext,
    language: &LanguageDefinition,
    label: &str,
) -> Option<f32> {
    if context.last_word == template::VARIABLE_MARKER && super::has_open_call(&context.current_line)
    {
        // Inside an argument list the variable placeholder must not pull in
        // assignment operators; the idiom rules handle closing the call.
        return None;
    }
    let key = match pending_operator(&context.current_line) {
        Some(op) => op.to_owned(),
        None => context.last_word.to_lowercase(),
    };
    if key.is_empty() {
        return None;
    }
    let row = language.sequences.get(&key)?;
    let index = row.iter().position(|entry| entry == label)?;
    // Entries past the tenth position would score zero or less; they must
    // not claim the candidate away from the idiom and starter rules.
    let scored = 1.0 - 0.1 * index as f32;
    (scored > 0.0).then_some(scored)
}

fn pending_operator(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_end();
    PENDING_OPERATORS.iter().copied().find(|op| trimmed.ends_with(op))
}
