//! Built-in C++ definition.

use super::{
    placeholders, sequences, starters, strings, symbol_button, word_button, KeyboardButton,
    LanguageDefinition, SnippetCategory,
};
use crate::template::TemplateMatchType;
use crate::tokenizer::SyntaxRules;

pub(super) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        key: "cpp".to_owned(),
        file_extensions: strings(&["cpp", "cc", "cxx", "hpp", "hh", "h"]),
        categories: vec![
            // --- Keywords ---
            SnippetCategory {
                name: "keywords".to_owned(),
                buttons: vec![
                    word_button("int"),
                    word_button("float"),
                    word_button("double"),
                    word_button("char"),
                    word_button("bool"),
                    word_button("auto"),
                    word_button("if"),
                    word_button("else"),
                    word_button("for"),
                    word_button("while"),
                    word_button("return"),
                    word_button("const"),
                    word_button("class"),
                ],
            },
            // --- Snippets with placeholders ---
            SnippetCategory {
                name: "snippets".to_owned(),
                buttons: vec![
                    KeyboardButton::new("main-fn", "main…", "int main() {\n    \n    return 0;\n}"),
                    KeyboardButton::new("if-block", "if…", "if (condition) {\n    \n}"),
                    KeyboardButton::new(
                        "for-loop",
                        "for…",
                        "for (int i = 0; i < 10; i++) {\n    \n}",
                    ),
                    KeyboardButton::new("while-block", "while…", "while (condition) {\n    \n}"),
                    KeyboardButton::new("fn-block", "fn…", "datatype functionName() {\n    \n}"),
                    KeyboardButton::new(
                        "class-block",
                        "class…",
                        "class ClassName {\npublic:\n    \n};",
                    ),
                    KeyboardButton::new("include", "#include", "#include <module>"),
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
                    symbol_button("<<"),
                    symbol_button(">>"),
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
                    symbol_button("&"),
                    symbol_button("!"),
                ],
            },
            // --- Values and streams ---
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
                    symbol_button("nullptr"),
                    symbol_button("cout"),
                    symbol_button("cin"),
                    symbol_button("endl"),
                    symbol_button("std::string"),
                ],
            },
        ],
        sequences: sequences(&[
            ("=", &["0", "1", "10", "\"", "nullptr", "true"]),
            ("+=", &["1"]),
            ("-=", &["1"]),
            ("var", &["=", ";", "+=", "["]),
            ("i", &["=", ";"]),
        ]),
        starters: starters(&[
            ("int", 0.9),
            ("if", 0.8),
            ("for", 0.7),
            ("auto", 0.65),
            ("while", 0.6),
            ("return", 0.55),
            ("cout", 0.5),
            ("#include", 0.45),
            ("}", 0.4),
        ]),
        syntax: SyntaxRules {
            keywords: strings(&[
                "int", "float", "double", "char", "bool", "void", "auto", "long", "short",
                "unsigned", "signed", "if", "else", "for", "while", "do", "switch", "case",
                "default", "break", "continue", "return", "struct", "class", "public", "private",
                "protected", "const", "static", "new", "delete", "namespace", "using", "true",
                "false", "nullptr", "sizeof", "#include",
            ]),
            builtins: strings(&[
                "std", "cout", "cin", "endl", "string", "vector", "map", "printf", "scanf",
                "size", "push_back", "begin", "end",
            ]),
            string_delimiters: vec!['"', '\''],
            line_comment: "//".to_owned(),
        },
        placeholders: placeholders(&[
            (TemplateMatchType::Function, &["main", "calculate", "process", "get_value"]),
            (TemplateMatchType::Class, &["MyClass", "Point", "Node"]),
            (TemplateMatchType::Variable, &["x", "i", "count", "result", "total"]),
            (TemplateMatchType::Condition, &["x > 0", "i < n", "count == 0"]),
            (TemplateMatchType::Module, &["iostream", "vector", "string", "cmath", "map"]),
            (TemplateMatchType::Type, &["int", "double", "std::string", "bool", "char"]),
        ]),
        membership_keyword: None,
        block_opener: Some("{".to_owned()),
        control_keywords: strings(&["if", "else", "for", "while", "do", "switch", "class", "struct"]),
    }
}
