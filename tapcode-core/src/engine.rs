//! The keyboard-facing facade.
//!
//! Wires the catalog service, the idiom registry, and the engine
//! configuration together behind a strings-in, rankings-out surface: the host
//! hands over the buffer text, the cursor offset, and the active language
//! key, and gets ranked buttons, insertion text, or highlight tokens back. The
//! pure functions underneath ([`scoring::rank`], [`scoring::expand`],
//! [`crate::tokenizer::classify_line`]) stay public for hosts that manage
//! their own [`LanguageDefinition`](crate::catalog::LanguageDefinition)
//! values.

use std::path::Path;
use std::sync::Arc;

use crate::catalog::{
    CatalogService, KeyboardButton, LanguageCatalog, LanguageDefinition, SnippetCategory,
};
use crate::config::EngineConfig;
use crate::context::TypingContext;
use crate::scoring::{self, IdiomRegistry, Prediction};
use crate::storage::{KeyValueStore, StorageError};
use crate::tokenizer::{classify_line, Token, TokenType};

/// Everything the keyboard view needs, behind one handle.
pub struct PredictionEngine {
    catalog: CatalogService,
    idioms: IdiomRegistry,
    config: EngineConfig,
}

impl PredictionEngine {
    /// Engine over `catalog` with the built-in idiom scorers and default
    /// configuration. `store` backs per-language tab customizations.
    pub fn new(catalog: Arc<LanguageCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog: CatalogService::new(catalog, store),
            idioms: IdiomRegistry::builtin(),
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the idiom registry, e.g. to add a scorer for a custom
    /// language.
    #[must_use]
    pub fn with_idioms(mut self, idioms: IdiomRegistry) -> Self {
        self.idioms = idioms;
        self
    }

    /// Current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> Arc<LanguageCatalog> {
        self.catalog.catalog()
    }

    /// Applies persisted per-language tab customizations over the catalog.
    pub async fn apply_saved(&self) {
        self.catalog.apply_saved().await;
    }

    /// Persists customized tabs for `language` and activates them.
    pub async fn save_categories(
        &self,
        language: &str,
        categories: Vec<SnippetCategory>,
    ) -> Result<(), StorageError> {
        self.catalog.save_categories(language, categories).await
    }

    /// Language key for a file path, resolved from its extension. `None`
    /// only when the catalog has no languages at all.
    #[must_use]
    pub fn language_for_path(&self, path: &Path) -> Option<String> {
        let catalog = self.catalog.catalog();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        catalog.language_for_extension(extension).map(|l| l.key.clone())
    }

    /// Ranked predictions for the cursor position in `text`, at most
    /// `prediction_limit` of them. An unknown language key falls back to the
    /// catalog's default language.
    #[must_use]
    pub fn predictions(&self, text: &str, cursor: usize, language: &str) -> Vec<Prediction> {
        let catalog = self.catalog.catalog();
        let Some(language) = resolve(&catalog, language) else {
            return Vec::new();
        };
        let context = TypingContext::extract(text, cursor);
        scoring::rank(&context, language, &self.idioms, self.config.prediction_limit)
    }

    /// Text to insert when `button` is tapped at the cursor position.
    #[must_use]
    pub fn insertion_text(
        &self,
        button: &KeyboardButton,
        text: &str,
        cursor: usize,
        language: &str,
    ) -> String {
        if !self.config.smart_expansion {
            return button.text.clone();
        }
        let catalog = self.catalog.catalog();
        let Some(language) = resolve(&catalog, language) else {
            return button.text.clone();
        };
        let context = TypingContext::extract(text, cursor);
        scoring::expand(button, &context, language, &self.config.indent_unit)
    }

    /// Highlight tokens for one line.
    #[must_use]
    pub fn classify(&self, line: &str, language: &str) -> Vec<Token> {
        let catalog = self.catalog.catalog();
        match resolve(&catalog, language) {
            Some(language) => classify_line(line, &language.syntax),
            None if line.is_empty() => Vec::new(),
            None => vec![Token { text: line.to_owned(), kind: TokenType::Default }],
        }
    }

    /// Extension point for usage-frequency adaptation. Confirmed selections
    /// are deliberately not fed back into scores.
    pub fn on_selection_confirmed(&self, button: &KeyboardButton, context: &TypingContext) {
        log::trace!("selection confirmed: {:?} after {:?}", button.label, context.last_word);
    }
}

fn resolve<'c>(catalog: &'c LanguageCatalog, key: &str) -> Option<&'c LanguageDefinition> {
    catalog.language(key).or_else(|| catalog.default_language())
}
