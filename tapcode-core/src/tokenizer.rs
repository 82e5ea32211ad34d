//! Line tokenizer for syntax highlighting.
//!
//! Splits one line at a time into typed spans through an explicit
//! three-state scanner (normal, in-string, in-comment). Concatenating the
//! produced token texts always reproduces the input line exactly, so the
//! highlighter can render straight from the token list.
//!
//! Classification is strictly per line: block comments spanning multiple
//! lines are not tracked. That keeps the scanner stateless across lines and
//! is a known limitation of the highlighting surface.
//!
//! Every flush of a pending word goes through the same keyword → builtin →
//! number → default classification, including the flush that happens when a
//! string delimiter or comment marker opens right after the word: `if# note`
//! keeps its keyword color. The flush rule is the single source of truth; a
//! word is never demoted to a plain span just because of what follows it.

use serde::{Deserialize, Serialize};

/// Characters that always terminate a pending word and form their own token.
const BOUNDARY_CHARS: &[char] = &[
    '(', ')', '[', ']', '{', '}', ',', '.', ':', ';', '=', '+', '-', '*', '/', '<', '>', '!', '&',
    '|', '%',
];

/// Syntactic classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Default,
    Keyword,
    Builtin,
    #[serde(rename = "string")]
    Str,
    Comment,
    Number,
}

/// One classified span of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenType,
}

impl Token {
    fn new(text: impl Into<String>, kind: TokenType) -> Self {
        Self { text: text.into(), kind }
    }
}

/// Per-language input to the tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxRules {
    pub keywords: Vec<String>,
    pub builtins: Vec<String>,
    pub string_delimiters: Vec<char>,
    /// Prefix that starts a comment running to the end of the line. Empty
    /// disables comment detection.
    pub line_comment: String,
}

/// Scanner state. The modes are mutually exclusive; `escaped` is the only
/// lookbehind the string mode needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    Normal,
    InString { delimiter: char, escaped: bool },
    InComment,
}

/// Splits `line` into classified tokens.
///
/// Never fails: unterminated strings run to the end of the line and are
/// still emitted as string tokens, and unknown input degrades to `Default`
/// spans.
#[must_use]
pub fn classify_line(line: &str, rules: &SyntaxRules) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending = String::new();
    let mut span = String::new();
    let mut mode = ScanMode::Normal;

    for (at, c) in line.char_indices() {
        match mode {
            ScanMode::Normal => {
                if !rules.line_comment.is_empty() && line[at..].starts_with(&rules.line_comment) {
                    flush(&mut tokens, &mut pending, rules);
                    span.push(c);
                    mode = ScanMode::InComment;
                } else if rules.string_delimiters.contains(&c) {
                    flush(&mut tokens, &mut pending, rules);
                    span.push(c);
                    mode = ScanMode::InString { delimiter: c, escaped: false };
                } else if c.is_whitespace() || BOUNDARY_CHARS.contains(&c) {
                    flush(&mut tokens, &mut pending, rules);
                    tokens.push(Token::new(c.to_string(), TokenType::Default));
                } else {
                    pending.push(c);
                }
            }
            ScanMode::InString { delimiter, escaped } => {
                span.push(c);
                if escaped {
                    mode = ScanMode::InString { delimiter, escaped: false };
                } else if c == '\\' {
                    mode = ScanMode::InString { delimiter, escaped: true };
                } else if c == delimiter {
                    tokens.push(Token::new(std::mem::take(&mut span), TokenType::Str));
                    mode = ScanMode::Normal;
                }
            }
            ScanMode::InComment => span.push(c),
        }
    }

    match mode {
        ScanMode::Normal => flush(&mut tokens, &mut pending, rules),
        ScanMode::InString { .. } => tokens.push(Token::new(span, TokenType::Str)),
        ScanMode::InComment => tokens.push(Token::new(span, TokenType::Comment)),
    }
    tokens
}

fn flush(tokens: &mut Vec<Token>, pending: &mut String, rules: &SyntaxRules) {
    if pending.is_empty() {
        return;
    }
    let word = std::mem::take(pending);
    let kind = classify_word(&word, rules);
    tokens.push(Token::new(word, kind));
}

fn classify_word(word: &str, rules: &SyntaxRules) -> TokenType {
    if rules.keywords.iter().any(|k| k == word) {
        TokenType::Keyword
    } else if rules.builtins.iter().any(|b| b == word) {
        TokenType::Builtin
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        TokenType::Number
    } else {
        TokenType::Default
    }
}
