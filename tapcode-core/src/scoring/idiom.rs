//! Per-language idiom scoring, the second rule of the cascade.
//!
//! Handwritten heuristics about what plausibly comes next in each language,
//! returning fixed confidences between 0.65 and 1.0. Each scorer matches the
//! shape of the line first and then decides which labels that shape wants,
//! so one shape never leaks suggestions into another. Languages register a
//! scorer under their catalog key; adding a language means adding a
//! registration, not growing a central match.

use std::collections::HashMap;

use crate::context::TypingContext;

/// Language-specific next-input heuristics.
pub trait IdiomScorer: Send + Sync {
    /// Confidence that `label` is the next input, if any idiom applies.
    fn score(&self, context: &TypingContext, label: &str) -> Option<f32>;
}

/// Maps language keys to their idiom scorers.
#[derive(Default)]
pub struct IdiomRegistry {
    scorers: HashMap<String, Box<dyn IdiomScorer>>,
}

impl IdiomRegistry {
    /// Empty registry; languages without a scorer simply skip this rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry covering the built-in languages.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("python", Box::new(PythonIdioms));
        registry.register("cpp", Box::new(CppIdioms));
        registry.register("javascript", Box::new(JavaScriptIdioms));
        registry
    }

    pub fn register(&mut self, language: impl Into<String>, scorer: Box<dyn IdiomScorer>) {
        self.scorers.insert(language.into(), scorer);
    }

    pub(crate) fn score(&self, language: &str, context: &TypingContext, label: &str) -> Option<f32> {
        self.scorers.get(language)?.score(context, label)
    }
}

// --- Python ---

const PYTHON_CONTROL: &[&str] =
    &["if", "elif", "else", "for", "while", "def", "class", "with", "try", "except", "finally"];
const PYTHON_CALLABLES: &[&str] = &["print", "range", "len", "input", "str", "int", "enumerate"];

/// Loop-header progression, call arguments, colon placement, assignment
/// pairing, call opening.
pub struct PythonIdioms;

impl IdiomScorer for PythonIdioms {
    fn score(&self, context: &TypingContext, label: &str) -> Option<f32> {
        let line = context.current_line.trim();
        let words = words(line);

        match words.as_slice() {
            // Loop headers progress variable -> membership -> iterable.
            ["for"] => {
                return match label {
                    "i" => Some(1.0),
                    "var" => Some(0.9),
                    _ => None,
                }
            }
            ["for", variable] if is_identifier(variable) => {
                return (label == "in").then_some(1.0)
            }
            ["for", _, "in"] => {
                return match label {
                    "range(" => Some(1.0),
                    "enumerate(" => Some(0.9),
                    _ => None,
                }
            }
            // Bare headers just want their colon.
            ["else" | "try" | "finally"] => return (label == ":").then_some(0.95),
            _ => {}
        }

        // Inside an open call: fill or finish the argument list.
        if super::has_open_call(line) {
            if line.ends_with("range(") {
                return match label {
                    "10" => Some(0.9),
                    "len(" => Some(0.8),
                    _ => None,
                };
            }
            if line.ends_with('(') {
                return match label {
                    "var" => Some(0.85),
                    "\"" => Some(0.8),
                    ")" => Some(0.75),
                    _ => None,
                };
            }
            return match label {
                ")" => Some(0.9),
                "," => Some(0.7),
                _ => None,
            };
        }

        // A filled-in header is terminated by its colon.
        if let [first, _second, ..] = words.as_slice() {
            if PYTHON_CONTROL.contains(first) && !line.ends_with(':') && parens_balanced(line) {
                return (label == ":").then_some(0.9);
            }
        }

        // A lone name pairs with an assignment.
        if let [name] = words.as_slice() {
            if is_identifier(name)
                && !PYTHON_CONTROL.contains(name)
                && !PYTHON_CALLABLES.contains(name)
            {
                return (label == "=").then_some(0.7);
            }
        }

        // A known callable opens its parenthesis.
        if PYTHON_CALLABLES.contains(&context.last_word.as_str()) {
            return (label == "(").then_some(0.9);
        }
        None
    }
}

// --- C++ ---

const CPP_CONTROL: &[&str] = &["if", "else", "for", "while", "do", "switch"];
const CPP_TYPES: &[&str] = &[
    "int", "float", "double", "char", "bool", "auto", "long", "short", "unsigned", "void",
    "std::string",
];

/// Header parens, declaration pairing, statement terminators, stream
/// operators.
pub struct CppIdioms;

impl IdiomScorer for CppIdioms {
    fn score(&self, context: &TypingContext, label: &str) -> Option<f32> {
        let line = context.current_line.trim();
        let words = words(line);

        // Control headers open with a paren; `for (` then wants its counter.
        if let ["for" | "if" | "while" | "switch"] = words.as_slice() {
            return (label == "(").then_some(1.0);
        }
        if line.ends_with("for (") || line.ends_with("for(") {
            return match label {
                "int" => Some(0.9),
                "auto" => Some(0.8),
                _ => None,
            };
        }

        if super::has_open_call(line) {
            if line.ends_with('(') {
                return match label {
                    "var" => Some(0.8),
                    "\"" => Some(0.75),
                    ")" => Some(0.7),
                    _ => None,
                };
            }
            return match label {
                ")" => Some(0.9),
                "," => Some(0.7),
                _ => None,
            };
        }

        // An unfinished header condition, then the header's block.
        if let Some(first) = words.first() {
            if CPP_CONTROL.contains(first) {
                if !parens_balanced(line) {
                    if line.ends_with('(') {
                        return match label {
                            "var" => Some(0.8),
                            "true" => Some(0.7),
                            _ => None,
                        };
                    }
                    return match label {
                        ")" => Some(0.85),
                        "==" => Some(0.7),
                        _ => None,
                    };
                }
                if line.ends_with(')') {
                    return (label == "{").then_some(0.95);
                }
            }
        }
        if let ["else"] = words.as_slice() {
            return (label == "{").then_some(0.95);
        }

        // A complete statement takes its semicolon.
        if statement_complete(line, &words) {
            return (label == ";").then_some(0.9);
        }

        // Declarations: type, then name, then value.
        match words.as_slice() {
            [t] if CPP_TYPES.contains(t) => return (label == "var").then_some(1.0),
            [t, name] if CPP_TYPES.contains(t) && is_identifier(name) => {
                return match label {
                    "=" => Some(0.9),
                    ";" => Some(0.7),
                    _ => None,
                }
            }
            _ => {}
        }

        // Stream pairing.
        if matches!(context.last_word.as_str(), "cout" | "std::cout") {
            return (label == "<<").then_some(0.95);
        }
        if matches!(context.last_word.as_str(), "cin" | "std::cin") {
            return (label == ">>").then_some(0.95);
        }
        None
    }
}

// --- JavaScript ---

const JS_CONTROL: &[&str] = &["if", "else", "for", "while", "do", "switch"];
const JS_DECLARATIONS: &[&str] = &["let", "const"];

/// Header parens, declaration pairing, method chains, optional semicolons.
pub struct JavaScriptIdioms;

impl IdiomScorer for JavaScriptIdioms {
    fn score(&self, context: &TypingContext, label: &str) -> Option<f32> {
        let line = context.current_line.trim();
        let words = words(line);

        match words.as_slice() {
            ["for" | "if" | "while" | "switch"] => return (label == "(").then_some(1.0),
            // Declarations: keyword, then name, then value.
            [decl] if JS_DECLARATIONS.contains(decl) => {
                return (label == "var").then_some(1.0)
            }
            [decl, name] if JS_DECLARATIONS.contains(decl) && is_identifier(name) => {
                return (label == "=").then_some(0.9)
            }
            _ => {}
        }

        // Method chains in progress.
        if context.last_word == "console." {
            return (label == "log(").then_some(1.0);
        }
        if line.ends_with('.') && context.last_word.len() > 1 {
            return match label {
                "map(" => Some(0.8),
                "filter(" => Some(0.75),
                "length" => Some(0.7),
                _ => None,
            };
        }

        if super::has_open_call(line) {
            if line.ends_with('(') {
                return match label {
                    "var" => Some(0.8),
                    "\"" => Some(0.75),
                    ")" => Some(0.7),
                    _ => None,
                };
            }
            return match label {
                ")" => Some(0.9),
                "," => Some(0.7),
                _ => None,
            };
        }

        if let Some(first) = words.first() {
            if JS_CONTROL.contains(first) {
                if !parens_balanced(line) {
                    if line.ends_with('(') {
                        return match label {
                            "var" => Some(0.8),
                            "true" => Some(0.7),
                            _ => None,
                        };
                    }
                    return match label {
                        ")" => Some(0.85),
                        "===" => Some(0.7),
                        _ => None,
                    };
                }
                if line.ends_with(')') {
                    return (label == "{").then_some(0.95);
                }
            }
        }
        if let ["else"] = words.as_slice() {
            return (label == "{").then_some(0.95);
        }

        // Semicolons are optional here, so low confidence.
        if statement_complete(line, &words) {
            return (label == ";").then_some(0.65);
        }
        None
    }
}

// --- Shared line-shape helpers ---

const OPERATOR_TAIL: &[char] = &['+', '-', '*', '/', '%', '<', '>', '&', '|', '=', '!'];

fn words(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn is_identifier(word: &str) -> bool {
    !word.is_empty()
        && !word.starts_with(|c: char| c.is_ascii_digit())
        && word.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn parens_balanced(line: &str) -> bool {
    let mut depth = 0i32;
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth == 0
}

/// A statement that looks finished: balanced, not already terminated, and
/// ending in something a statement can end in.
fn statement_complete(line: &str, words: &[&str]) -> bool {
    if line.is_empty() || !parens_balanced(line) {
        return false;
    }
    if line.ends_with([';', '{', '}', '(', ',']) {
        return false;
    }
    let increments = line.ends_with("++") || line.ends_with("--");
    if !increments && line.ends_with(OPERATOR_TAIL) {
        return false;
    }
    increments
        || line.ends_with(')')
        || words.last() == Some(&"endl")
        || assignment_complete(line)
}

fn assignment_complete(line: &str) -> bool {
    match line.rsplit_once('=') {
        Some((_, rhs)) => !rhs.trim().is_empty(),
        None => false,
    }
}
