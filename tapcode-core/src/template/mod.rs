//! Template placeholders inside snippet text.
//!
//! Snippet buttons insert scaffolding like `for var in range(10):` where
//! `var` is a placeholder the editor lets the user fill right after
//! insertion. This module locates placeholder markers, offers fill-in
//! suggestions (canonical values first, then recently confirmed ones), and
//! splices replacements back into the text. Confirmed values are kept in a
//! persisted history, see [`TemplateHistoryStore`].

mod history;

pub use history::{TemplateHistory, TemplateHistoryStore};

use serde::{Deserialize, Serialize};

use crate::catalog::LanguageDefinition;

/// The generic variable placeholder. Also special-cased by sequence scoring.
pub(crate) const VARIABLE_MARKER: &str = "var";

/// Marker vocabulary. Spellings are chosen so no marker is a keyword in any
/// supported language (`functionName` rather than `function`, which
/// JavaScript reserves) and so markers cannot overlap each other.
const MARKERS: &[(&str, TemplateMatchType)] = &[
    ("functionName", TemplateMatchType::Function),
    ("ClassName", TemplateMatchType::Class),
    (VARIABLE_MARKER, TemplateMatchType::Variable),
    ("condition", TemplateMatchType::Condition),
    ("module", TemplateMatchType::Module),
    ("datatype", TemplateMatchType::Type),
];

/// What a placeholder stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMatchType {
    Function,
    Class,
    Variable,
    Condition,
    Module,
    Type,
}

/// One placeholder occurrence; byte offsets, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateMatch {
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
    pub kind: TemplateMatchType,
}

/// All placeholder occurrences in `text`, sorted by start offset.
///
/// Markers only match as whole words: `var` inside `variance` is not a
/// placeholder.
#[must_use]
pub fn find_all(text: &str) -> Vec<TemplateMatch> {
    let mut found = Vec::new();
    for (marker, kind) in MARKERS {
        for (start, hit) in text.match_indices(marker) {
            let end = start + hit.len();
            if is_whole_word(text, start, end) {
                found.push(TemplateMatch {
                    placeholder: (*marker).to_owned(),
                    start,
                    end,
                    kind: *kind,
                });
            }
        }
    }
    found.sort_by_key(|m| m.start);
    found
}

/// The placeholder covering `offset`, if any. Both edges count as covered,
/// so a cursor sitting right after the marker still hits it.
#[must_use]
pub fn find_at(text: &str, offset: usize) -> Option<TemplateMatch> {
    find_all(text)
        .into_iter()
        .find(|m| m.start <= offset && offset <= m.end)
}

/// Splices `replacement` over the matched region. Other occurrences of the
/// same marker are left alone.
#[must_use]
pub fn substitute(text: &str, m: &TemplateMatch, replacement: &str) -> String {
    let (Some(head), Some(tail)) = (text.get(..m.start), text.get(m.end..)) else {
        return text.to_owned();
    };
    format!("{head}{replacement}{tail}")
}

/// Fill-in suggestions for one placeholder kind: the language's canonical
/// values first, then history values (newest first) not already present.
#[must_use]
pub fn suggestions_for(
    kind: TemplateMatchType,
    language: &LanguageDefinition,
    history: &TemplateHistory,
) -> Vec<String> {
    let mut out: Vec<String> = language.placeholder_values(kind).to_vec();
    for value in history.bucket(kind) {
        if !out.iter().any(|v| v == value) {
            out.push(value.clone());
        }
    }
    out
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
    let after_ok = text[end..].chars().next().is_none_or(|c| !is_word_char(c));
    before_ok && after_ok
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
