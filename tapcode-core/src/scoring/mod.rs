//! Ranking of keyboard candidates for a typing context.
//!
//! Per candidate, three mutually exclusive rules are tried in order and the
//! first one that matches owns the score:
//!
//! 1. affinity sequences from the language catalog,
//! 2. per-language idiom heuristics,
//! 3. fresh-line starter weights, only when nothing above matched and the
//!    cursor sits on an otherwise empty line.
//!
//! Ranking is a pure function of its inputs: confirmed selections are
//! reported to the engine facade but deliberately do not feed back into
//! scores.

mod expansion;
mod idiom;
mod sequence;

pub use expansion::expand;
pub use idiom::{CppIdioms, IdiomRegistry, IdiomScorer, JavaScriptIdioms, PythonIdioms};

use serde::Serialize;

use crate::catalog::{KeyboardButton, LanguageDefinition};
use crate::context::TypingContext;

/// Which rule scored a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredictionReason {
    Sequence,
    Idiom,
    LineStart,
}

/// One ranked keyboard candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub button: KeyboardButton,
    pub score: f32,
    pub reason: PredictionReason,
}

/// Ranks `language`'s candidate pool against `context`.
///
/// Zero-scored candidates are dropped, ties keep catalog order, and at most
/// `limit` predictions come back.
#[must_use]
pub fn rank(
    context: &TypingContext,
    language: &LanguageDefinition,
    idioms: &IdiomRegistry,
    limit: usize,
) -> Vec<Prediction> {
    let mut ranked = Vec::new();
    for button in language.candidate_pool() {
        let scored = sequence::score(context, language, &button.label)
            .map(|score| (score, PredictionReason::Sequence))
            .or_else(|| {
                idioms
                    .score(&language.key, context, &button.label)
                    .map(|score| (score, PredictionReason::Idiom))
            })
            .or_else(|| {
                starter_score(context, language, &button.label)
                    .map(|score| (score, PredictionReason::LineStart))
            });
        if let Some((score, reason)) = scored {
            if score > 0.0 {
                ranked.push(Prediction { button: button.clone(), score, reason });
            }
        }
    }
    // Stable sort keeps catalog order between equal scores.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

fn starter_score(
    context: &TypingContext,
    language: &LanguageDefinition,
    label: &str,
) -> Option<f32> {
    if !context.is_new_line {
        return None;
    }
    language.starters.get(label).copied().filter(|weight| *weight > 0.0)
}

/// Whether `line` contains a call (a word glued to `(`) that has not been
/// closed yet.
pub(crate) fn has_open_call(line: &str) -> bool {
    let mut open = Vec::new();
    let mut after_word = false;
    for c in line.chars() {
        match c {
            '(' => {
                open.push(after_word);
                after_word = false;
            }
            ')' => {
                open.pop();
                after_word = false;
            }
            _ => after_word = c.is_alphanumeric() || c == '_',
        }
    }
    open.into_iter().any(|is_call| is_call)
}
