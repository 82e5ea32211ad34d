//! End-to-end scenarios across catalog, scoring, templates, and persistence,
//! driven through the surfaces the keyboard host actually calls.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{self, KeyboardButton, LanguageDefinition, SnippetCategory};
use crate::config::EngineConfig;
use crate::engine::PredictionEngine;
use crate::scoring::{self, IdiomRegistry, PredictionReason};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::template::{self, TemplateHistoryStore, TemplateMatchType};
use crate::test_helpers::{ctx, javascript, labels, python};
use crate::tokenizer::{SyntaxRules, TokenType};

fn engine() -> PredictionEngine {
    PredictionEngine::new(catalog::builtin(), Arc::new(MemoryStore::new()))
}

fn button(engine: &PredictionEngine, language: &str, label: &str) -> KeyboardButton {
    engine
        .catalog()
        .language(language)
        .and_then(|l| l.candidate_pool().into_iter().find(|b| b.label == label).cloned())
        .expect("label should exist in the built-in catalog")
}

// --- Prediction flows ---

#[test]
fn python_loop_header_progression() {
    let engine = engine();

    // "for " wants its counter variable first.
    let ranked = engine.predictions("for ", 4, "python");
    assert_eq!(ranked[0].button.label, "i");
    assert!((ranked[0].score - 1.0).abs() < 1e-6);
    assert_eq!(ranked[0].reason, PredictionReason::Idiom);

    // "for i " wants the membership keyword.
    let ranked = engine.predictions("for i ", 6, "python");
    assert_eq!(ranked[0].button.label, "in");
    assert!((ranked[0].score - 1.0).abs() < 1e-6);

    // "for i in " wants something iterable.
    let ranked = engine.predictions("for i in ", 9, "python");
    assert_eq!(labels(&ranked), vec!["range(", "enumerate("]);
}

#[test]
fn cpp_declaration_offers_a_name_but_no_terminator() {
    let ranked = engine().predictions("int ", 4, "cpp");
    assert_eq!(labels(&ranked), vec!["var"]);
    assert!((ranked[0].score - 1.0).abs() < 1e-6);
}

#[test]
fn javascript_declarations_pair_name_then_value() {
    let language = javascript();
    let idioms = IdiomRegistry::builtin();

    let ranked = scoring::rank(&ctx("const "), &language, &idioms, 8);
    assert_eq!(ranked[0].button.label, "var");

    let ranked = scoring::rank(&ctx("const total"), &language, &idioms, 8);
    assert_eq!(labels(&ranked), vec!["="]);
}

#[test]
fn affinity_lists_rank_by_position_with_tenth_gaps() {
    let language = fixture_language();
    // No idiom scorer registered, so the affinity table is the only rule.
    let ranked = scoring::rank(&ctx("for"), &language, &IdiomRegistry::new(), 10);
    assert_eq!(labels(&ranked), vec!["i", "var"]);
    assert_eq!(ranked[0].reason, PredictionReason::Sequence);
    assert!((ranked[0].score - ranked[1].score - 0.1).abs() < 1e-6);
}

#[test]
fn nothing_matches_mid_line_when_starters_are_gated() {
    // Starters only apply to fresh lines, and no sequence or idiom rule
    // recognizes a finished Python assignment.
    let ranked = engine().predictions("x = 1  ", 7, "python");
    assert!(ranked.is_empty());
}

// --- Insertion text ---

#[test]
fn block_openers_expand_with_the_configured_indent() {
    let engine = engine().with_config(EngineConfig::default().with_indent_unit("\t"));
    let colon = button(&engine, "python", ":");
    assert_eq!(engine.insertion_text(&colon, "if x == 1", 9, "python"), ":\n\t");
}

#[test]
fn membership_keyword_expansion_through_the_facade() {
    let engine = engine();
    let in_button = button(&engine, "python", "in");
    assert_eq!(engine.insertion_text(&in_button, "for i", 5, "python"), " in ");
    assert_eq!(engine.insertion_text(&in_button, "for i ", 6, "python"), "in ");
}

// --- Template flows ---

#[test]
fn placeholder_fill_round_trip_on_a_catalog_snippet() {
    let engine = engine();
    let catalog = engine.catalog();
    let snippet = catalog
        .language("python")
        .and_then(|l| {
            l.candidate_pool().into_iter().find(|b| b.text.contains("functionName")).cloned()
        })
        .expect("python should ship a function snippet");

    let matches = template::find_all(&snippet.text);
    let slot = matches.first().expect("snippet should carry a placeholder");
    assert_eq!(slot.kind, TemplateMatchType::Function);

    let filled = template::substitute(&snippet.text, slot, "render");
    assert!(filled.contains("def render()"));
    assert!(template::find_at(&filled, slot.start).is_none(), "filled slot is no longer a marker");
}

#[tokio::test]
async fn suggestions_put_canonical_values_before_history() {
    let store = Arc::new(MemoryStore::new());
    let history = TemplateHistoryStore::load(store as Arc<dyn KeyValueStore>).await;
    history.record_confirmed(TemplateMatchType::Variable, "accumulator").await;

    let language = python();
    let suggestions = history.suggestions(TemplateMatchType::Variable, &language).await;

    let canonical = language.placeholder_values(TemplateMatchType::Variable);
    assert_eq!(&suggestions[..canonical.len()], canonical);
    assert_eq!(suggestions.last().map(String::as_str), Some("accumulator"));
    // Seed values that double as canonical values are not repeated.
    assert_eq!(suggestions.iter().filter(|v| *v == "i").count(), 1);
}

// --- Persistence flows ---

#[tokio::test]
async fn history_cap_survives_a_reload() {
    let store = Arc::new(MemoryStore::new());
    let history = TemplateHistoryStore::load(Arc::clone(&store) as Arc<dyn KeyValueStore>).await;
    for n in 0..25 {
        history.record_confirmed(TemplateMatchType::Variable, &format!("v{n}")).await;
    }

    let reloaded = TemplateHistoryStore::load(store as Arc<dyn KeyValueStore>).await;
    let snapshot = reloaded.history().await;
    let bucket = snapshot.bucket(TemplateMatchType::Variable);
    assert_eq!(bucket.len(), 20);
    assert_eq!(bucket[0], "v24");
    assert_eq!(bucket[19], "v5");
}

#[tokio::test]
async fn customized_tabs_survive_a_restart() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let custom = vec![SnippetCategory {
        name: "mine".to_owned(),
        buttons: vec![KeyboardButton::new("go", "go", "go ")],
    }];

    let engine = PredictionEngine::new(catalog::builtin(), Arc::clone(&store));
    engine.save_categories("python", custom.clone()).await.expect("save should succeed");

    let restarted = PredictionEngine::new(catalog::builtin(), Arc::clone(&store));
    restarted.apply_saved().await;
    let catalog = restarted.catalog();
    assert_eq!(catalog.language("python").map(|l| l.categories.clone()), Some(custom));
    // Other languages keep their built-in tabs.
    assert_eq!(
        catalog.language("cpp").map(|l| l.categories.len()),
        catalog::builtin().language("cpp").map(|l| l.categories.len()),
    );
}

// --- Highlighting ---

#[test]
fn python_line_classification_matches_the_highlighter_contract() {
    let line = "if x == 1:  # check";
    let tokens = engine().classify(line, "python");

    let concat: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(concat, line, "token texts must reproduce the line");

    let kind_of = |text: &str| tokens.iter().find(|t| t.text == text).map(|t| t.kind);
    assert_eq!(kind_of("if"), Some(TokenType::Keyword));
    assert_eq!(kind_of("x"), Some(TokenType::Default));
    assert_eq!(kind_of("1"), Some(TokenType::Number));
    assert_eq!(kind_of("# check"), Some(TokenType::Comment));
    // Operator characters are boundary tokens, not a classified kind.
    let eq_tokens: Vec<_> = tokens.iter().filter(|t| t.text == "=").collect();
    assert_eq!(eq_tokens.len(), 2);
    assert!(eq_tokens.iter().all(|t| t.kind == TokenType::Default));
}

// --- Fixtures ---

fn fixture_language() -> LanguageDefinition {
    let buttons =
        vec![symbol("i"), symbol("var"), symbol("other")];
    LanguageDefinition {
        key: "fixture".to_owned(),
        file_extensions: vec!["fix".to_owned()],
        categories: vec![SnippetCategory { name: "all".to_owned(), buttons }],
        sequences: HashMap::from([(
            "for".to_owned(),
            vec!["i".to_owned(), "var".to_owned()],
        )]),
        starters: HashMap::new(),
        syntax: SyntaxRules::default(),
        placeholders: HashMap::new(),
        membership_keyword: None,
        block_opener: None,
        control_keywords: vec![],
    }
}

fn symbol(label: &str) -> KeyboardButton {
    KeyboardButton::new(label, label, label)
}
