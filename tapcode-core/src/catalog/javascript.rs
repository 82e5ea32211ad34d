//! Built-in JavaScript definition.

use super::{
    placeholders, sequences, starters, strings, symbol_button, word_button, KeyboardButton,
    LanguageDefinition, SnippetCategory,
};
use crate::template::TemplateMatchType;
use crate::tokenizer::SyntaxRules;

pub(super) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        key: "javascript".to_owned(),
        file_extensions: strings(&["js", "mjs", "jsx"]),
        categories: vec![
            // --- Keywords ---
            SnippetCategory {
                name: "keywords".to_owned(),
                buttons: vec![
                    word_button("const"),
                    word_button("let"),
                    word_button("function"),
                    word_button("return"),
                    word_button("if"),
                    word_button("else"),
                    word_button("for"),
                    word_button("while"),
                    word_button("class"),
                    word_button("new"),
                    word_button("await"),
                ],
            },
            // --- Snippets with placeholders ---
            SnippetCategory {
                name: "snippets".to_owned(),
                buttons: vec![
                    KeyboardButton::new(
                        "fn-block",
                        "function…",
                        "function functionName() {\n    \n}",
                    ),
                    KeyboardButton::new(
                        "arrow-fn",
                        "arrow…",
                        "const functionName = () => {\n    \n}",
                    ),
                    KeyboardButton::new("if-block", "if…", "if (condition) {\n    \n}"),
                    KeyboardButton::new(
                        "for-loop",
                        "for…",
                        "for (let i = 0; i < 10; i++) {\n    \n}",
                    ),
                    KeyboardButton::new(
                        "class-block",
                        "class…",
                        "class ClassName {\n    constructor() {\n        \n    }\n}",
                    ),
                ],
            },
            // --- Operators and punctuation ---
            SnippetCategory {
                name: "operators".to_owned(),
                buttons: vec![
                    symbol_button("="),
                    symbol_button("=="),
                    symbol_button("==="),
                    symbol_button("!="),
                    symbol_button("!=="),
                    symbol_button("+"),
                    symbol_button("-"),
                    symbol_button("*"),
                    symbol_button("/"),
                    symbol_button("%"),
                    symbol_button("+="),
                    symbol_button("-="),
                    symbol_button("<"),
                    symbol_button(">"),
                    symbol_button("<="),
                    symbol_button(">="),
                    symbol_button("=>"),
                    symbol_button(";"),
                    symbol_button(","),
                    symbol_button("."),
                    symbol_button("("),
                    symbol_button(")"),
                    symbol_button("{"),
                    symbol_button("}"),
                    symbol_button("["),
                    symbol_button("]"),
                    symbol_button("\""),
                    symbol_button("'"),
                    symbol_button("`"),
                    symbol_button("!"),
                ],
            },
            // --- Values and common members ---
            SnippetCategory {
                name: "values".to_owned(),
                buttons: vec![
                    symbol_button("var"),
                    symbol_button("i"),
                    symbol_button("0"),
                    symbol_button("1"),
                    symbol_button("10"),
                    symbol_button("true"),
                    symbol_button("false"),
                    symbol_button("null"),
                    symbol_button("undefined"),
                    symbol_button("console.log("),
                    symbol_button("log("),
                    symbol_button("map("),
                    symbol_button("filter("),
                    symbol_button("length"),
                ],
            },
        ],
        sequences: sequences(&[
            ("=", &["0", "\"", "[", "{", "10", "null"]),
            ("+=", &["1"]),
            ("-=", &["1"]),
            ("i", &["=", "+="]),
        ]),
        starters: starters(&[
            ("const", 0.9),
            ("let", 0.85),
            ("if", 0.8),
            ("for", 0.7),
            ("function", 0.65),
            ("console.log(", 0.6),
            ("return", 0.5),
            ("}", 0.4),
        ]),
        syntax: SyntaxRules {
            keywords: strings(&[
                "const", "let", "var", "function", "return", "if", "else", "for", "while", "do",
                "switch", "case", "break", "continue", "new", "class", "extends", "this",
                "typeof", "instanceof", "of", "in", "async", "await", "try", "catch", "finally",
                "throw", "true", "false", "null", "undefined", "import", "export", "from",
                "default",
            ]),
            builtins: strings(&[
                "console", "log", "map", "filter", "reduce", "push", "pop", "length", "JSON",
                "parse", "stringify", "Math", "setTimeout", "document", "window",
            ]),
            string_delimiters: vec!['"', '\'', '`'],
            line_comment: "//".to_owned(),
        },
        placeholders: placeholders(&[
            (TemplateMatchType::Function, &["main", "handleClick", "getData", "update"]),
            (TemplateMatchType::Class, &["MyClass", "Component", "Item"]),
            (TemplateMatchType::Variable, &["x", "i", "count", "result", "data", "items"]),
            (TemplateMatchType::Condition, &["x > 0", "i < 10", "items.length > 0"]),
            (TemplateMatchType::Module, &["react", "fs", "path", "express"]),
            (TemplateMatchType::Type, &["number", "string", "boolean", "object"]),
        ]),
        membership_keyword: None,
        block_opener: Some("{".to_owned()),
        control_keywords: strings(&[
            "if", "else", "for", "while", "do", "switch", "function", "class",
        ]),
    }
}
