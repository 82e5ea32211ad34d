//! tapcode-core - contextual input prediction for a programming keyboard.
//!
//! This crate is the engine behind the on-screen programming keyboard of a
//! mobile code editor. Given the buffer text, the cursor position, and the
//! active language, it ranks the keyboard's candidate buttons (keywords,
//! operators, snippet templates) so the most plausible next input surfaces
//! first. Around that core it ships a line tokenizer for syntax
//! highlighting, a typing-context extractor, a template-placeholder resolver
//! with most-recently-used fill history, and the language catalog feeding
//! all of the above.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use tapcode_core::{catalog, MemoryStore, PredictionEngine};
//!
//! let engine = PredictionEngine::new(catalog::builtin(), Arc::new(MemoryStore::new()));
//! let ranked = engine.predictions("for ", 4, "python");
//! assert_eq!(ranked[0].button.label, "i");
//! ```
//!
//! ## Architecture
//!
//! Ranking, tokenizing, and context extraction are pure functions over the
//! immutable catalog: no I/O, no suspension points, safe to call on every
//! keystroke and to discard when a newer edit lands. The only stateful seams
//! are template-fill history and per-language catalog customization, both of
//! which persist through an injected [`KeyValueStore`] and degrade to
//! built-in defaults when the stored data is missing or malformed. A slow or
//! failing store never blocks or corrupts ranking.

// Public library modules
pub mod catalog;
pub mod config;
pub mod context;
pub mod engine;
pub mod scoring;
pub mod storage;
pub mod template;
pub mod tokenizer;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use catalog::{
    CatalogService, KeyboardButton, LanguageCatalog, LanguageDefinition, SnippetCategory,
};
pub use config::{ConfigError, EngineConfig};
pub use context::TypingContext;
pub use engine::PredictionEngine;
pub use scoring::{IdiomRegistry, IdiomScorer, Prediction, PredictionReason};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use template::{TemplateHistory, TemplateHistoryStore, TemplateMatch, TemplateMatchType};
pub use tokenizer::{classify_line, SyntaxRules, Token, TokenType};
