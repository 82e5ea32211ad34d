//! Built-in Python definition.

use super::{
    placeholders, sequences, starters, strings, symbol_button, word_button, KeyboardButton,
    LanguageDefinition, SnippetCategory,
};
use crate::template::TemplateMatchType;
use crate::tokenizer::SyntaxRules;

pub(super) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        key: "python".to_owned(),
        file_extensions: strings(&["py", "pyw"]),
        categories: vec![
            // --- Keywords ---
            SnippetCategory {
                name: "keywords".to_owned(),
                buttons: vec![
                    word_button("if"),
                    word_button("elif"),
                    word_button("else"),
                    word_button("for"),
                    word_button("while"),
                    word_button("def"),
                    word_button("return"),
                    word_button("import"),
                    word_button("in"),
                    word_button("not"),
                    word_button("and"),
                    word_button("or"),
                    word_button("class"),
                ],
            },
            // --- Snippets with placeholders ---
            SnippetCategory {
                name: "snippets".to_owned(),
                buttons: vec![
                    KeyboardButton::new("if-block", "if…", "if condition:\n    "),
                    KeyboardButton::new("for-range", "for…", "for var in range(10):\n    "),
                    KeyboardButton::new("while-block", "while…", "while condition:\n    "),
                    KeyboardButton::new("def-block", "def…", "def functionName():\n    "),
                    KeyboardButton::new("class-block", "class…", "class ClassName:\n    "),
                    KeyboardButton::new("import-module", "import…", "import module"),
                ],
            },
            // --- Operators and punctuation ---
            SnippetCategory {
                name: "operators".to_owned(),
                buttons: vec![
                    symbol_button("="),
                    symbol_button("=="),
                    symbol_button("!="),
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
                    symbol_button(":"),
                    symbol_button(","),
                    symbol_button("."),
                    symbol_button("("),
                    symbol_button(")"),
                    symbol_button("["),
                    symbol_button("]"),
                    symbol_button("\""),
                    symbol_button("'"),
                ],
            },
            // --- Values and common calls ---
            SnippetCategory {
                name: "values".to_owned(),
                buttons: vec![
                    symbol_button("var"),
                    symbol_button("i"),
                    symbol_button("0"),
                    symbol_button("1"),
                    symbol_button("10"),
                    symbol_button("None"),
                    symbol_button("True"),
                    symbol_button("False"),
                    symbol_button("print("),
                    symbol_button("range("),
                    symbol_button("enumerate("),
                    symbol_button("len("),
                    symbol_button("input("),
                ],
            },
        ],
        sequences: sequences(&[
            ("=", &["0", "\"", "[", "input(", "10", "None"]),
            ("+=", &["1"]),
            ("-=", &["1"]),
            ("var", &["=", "+=", "-=", ".", "["]),
            ("i", &["=", "+="]),
        ]),
        starters: starters(&[
            ("var", 0.9),
            ("if", 0.8),
            ("def", 0.75),
            ("for", 0.7),
            ("print(", 0.65),
            ("import", 0.6),
            ("while", 0.55),
            ("return", 0.5),
            ("class", 0.45),
        ]),
        syntax: SyntaxRules {
            keywords: strings(&[
                "if", "elif", "else", "for", "while", "def", "return", "import", "from", "in",
                "not", "and", "or", "class", "try", "except", "finally", "with", "as", "pass",
                "break", "continue", "lambda", "is", "del", "global", "yield", "None", "True",
                "False",
            ]),
            builtins: strings(&[
                "print", "input", "len", "range", "str", "int", "float", "list", "dict", "set",
                "tuple", "type", "open", "enumerate", "abs", "min", "max", "sum",
            ]),
            string_delimiters: vec!['"', '\''],
            line_comment: "#".to_owned(),
        },
        placeholders: placeholders(&[
            (TemplateMatchType::Function, &["main", "run", "calculate", "get_value", "process"]),
            (TemplateMatchType::Class, &["MyClass", "Point", "Item"]),
            (TemplateMatchType::Variable, &["x", "i", "count", "result", "name", "total"]),
            (TemplateMatchType::Condition, &["x > 0", "i < 10", "count == 0", "name != \"\""]),
            (TemplateMatchType::Module, &["math", "random", "os", "sys", "json"]),
            (TemplateMatchType::Type, &["int", "str", "float", "list"]),
        ]),
        membership_keyword: Some("in".to_owned()),
        block_opener: Some(":".to_owned()),
        control_keywords: strings(&[
            "if", "elif", "else", "for", "while", "def", "class", "with", "try", "except",
            "finally",
        ]),
    }
}
