//! The language catalog: everything the programming keyboard can offer.
//!
//! Each supported language ships a [`LanguageDefinition`]: its keyboard tabs
//! of buttons, the affinity tables and starter weights the scoring engine
//! reads, syntax rules for the line tokenizer, and canonical placeholder
//! values for the template resolver. The catalog is ordered and read-only;
//! user customization produces a whole new catalog that is swapped in
//! atomically by [`CatalogService`].

mod cpp;
mod javascript;
mod python;

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::storage::{KeyValueStore, StorageError};
use crate::template::TemplateMatchType;
use crate::tokenizer::SyntaxRules;

/// One keycap: what it shows and what it inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    /// Stable id, unique within its language.
    pub id: String,
    /// Shown on the keycap; also the key every scoring lookup matches on.
    pub label: String,
    /// Inserted text; may span lines and carry template placeholders.
    pub text: String,
}

impl KeyboardButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), text: text.into() }
    }
}

/// One keyboard tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetCategory {
    pub name: String,
    pub buttons: Vec<KeyboardButton>,
}

/// Everything the engine knows about one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDefinition {
    /// Canonical lowercase identifier ("python", "cpp", "javascript").
    pub key: String,
    /// Lowercase file extensions without the dot.
    pub file_extensions: Vec<String>,
    pub categories: Vec<SnippetCategory>,
    /// Affinity table: a case-folded word or a pending operator maps to
    /// button labels, most plausible first.
    pub sequences: HashMap<String, Vec<String>>,
    /// Fresh-line starter weight per button label; absent labels never start
    /// a line.
    pub starters: HashMap<String, f32>,
    pub syntax: SyntaxRules,
    /// Canonical fill-in values per placeholder kind.
    pub placeholders: HashMap<TemplateMatchType, Vec<String>>,
    /// Membership keyword of loop headers (`in` for Python).
    pub membership_keyword: Option<String>,
    /// Punctuation that opens an indented block (`:` or `{`).
    pub block_opener: Option<String>,
    /// Keywords that begin control-flow headers; drives smart expansion.
    pub control_keywords: Vec<String>,
}

impl LanguageDefinition {
    /// All buttons across categories, deduplicated by label with the first
    /// occurrence kept. The returned order is the catalog order that ranking
    /// ties break on.
    #[must_use]
    pub fn candidate_pool(&self) -> Vec<&KeyboardButton> {
        let mut seen = std::collections::HashSet::new();
        let mut pool = Vec::new();
        for category in &self.categories {
            for button in &category.buttons {
                if seen.insert(button.label.as_str()) {
                    pool.push(button);
                }
            }
        }
        pool
    }

    /// Canonical placeholder values for `kind`; empty when the language has
    /// none.
    #[must_use]
    pub fn placeholder_values(&self, kind: TemplateMatchType) -> &[String] {
        self.placeholders.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Whether `line` starts a control-flow header (`if`, `for`, ...).
    pub(crate) fn is_control_header(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.control_keywords.iter().any(|kw| match trimmed.strip_prefix(kw.as_str()) {
            Some(rest) => !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'),
            None => false,
        })
    }
}

/// Ordered, read-only collection of language definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCatalog {
    languages: Vec<LanguageDefinition>,
}

impl LanguageCatalog {
    #[must_use]
    pub fn new(languages: Vec<LanguageDefinition>) -> Self {
        Self { languages }
    }

    #[must_use]
    pub fn languages(&self) -> &[LanguageDefinition] {
        &self.languages
    }

    /// Exact key lookup.
    #[must_use]
    pub fn language(&self, key: &str) -> Option<&LanguageDefinition> {
        self.languages.iter().find(|l| l.key == key)
    }

    /// The first registered language, which unknown inputs fall back to.
    /// `None` only for a catalog with no languages at all.
    #[must_use]
    pub fn default_language(&self) -> Option<&LanguageDefinition> {
        self.languages.first()
    }

    /// Case-insensitive extension lookup with fallback to the default
    /// language. A leading dot is tolerated.
    #[must_use]
    pub fn language_for_extension(&self, extension: &str) -> Option<&LanguageDefinition> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.languages
            .iter()
            .find(|l| l.file_extensions.iter().any(|e| *e == extension))
            .or_else(|| self.default_language())
    }
}

/// The catalog shipped with the app: Python, C++, JavaScript, in that order.
/// Python is the default language. Built once and shared.
#[must_use]
pub fn builtin() -> Arc<LanguageCatalog> {
    static BUILTIN: Lazy<Arc<LanguageCatalog>> = Lazy::new(|| {
        Arc::new(LanguageCatalog::new(vec![
            python::definition(),
            cpp::definition(),
            javascript::definition(),
        ]))
    });
    Arc::clone(&BUILTIN)
}

/// Storage key for one language's saved categories.
fn customization_key(language: &str) -> String {
    format!("catalog.{language}")
}

/// Shared catalog plus user-customization persistence.
///
/// Readers take cheap snapshots and never block. Updates clone the current
/// catalog, mutate the clone, and swap it in; one mutex is held across that
/// whole region (including the storage awaits), so a reload racing a save
/// cannot store a stale snapshot over the saved tabs.
pub struct CatalogService {
    current: ArcSwap<LanguageCatalog>,
    store: Arc<dyn KeyValueStore>,
    update: Mutex<()>,
}

impl CatalogService {
    pub fn new(catalog: Arc<LanguageCatalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { current: ArcSwap::from(catalog), store, update: Mutex::new(()) }
    }

    /// Current snapshot.
    #[must_use]
    pub fn catalog(&self) -> Arc<LanguageCatalog> {
        self.current.load_full()
    }

    /// Applies saved per-language category customizations over the current
    /// catalog. Missing blobs keep the built-in tabs; malformed blobs are
    /// logged and skipped.
    pub async fn apply_saved(&self) {
        let _update = self.update.lock().await;
        let mut catalog = (*self.current.load_full()).clone();
        for language in &mut catalog.languages {
            match self.store.get(&customization_key(&language.key)).await {
                Ok(Some(raw)) => match serde_json::from_str::<Vec<SnippetCategory>>(&raw) {
                    Ok(categories) => language.categories = categories,
                    Err(err) => {
                        log::warn!("malformed saved categories for {}: {err}", language.key);
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    log::warn!("could not read saved categories for {}: {err}", language.key);
                }
            }
        }
        self.current.store(Arc::new(catalog));
    }

    /// Persists customized categories for `language` and swaps the updated
    /// catalog in. On a failed write the active catalog stays unchanged.
    pub async fn save_categories(
        &self,
        language: &str,
        categories: Vec<SnippetCategory>,
    ) -> Result<(), StorageError> {
        let _update = self.update.lock().await;
        let raw = serde_json::to_string(&categories)?;
        self.store.set(&customization_key(language), &raw).await?;

        let mut catalog = (*self.current.load_full()).clone();
        match catalog.languages.iter_mut().find(|l| l.key == language) {
            Some(definition) => {
                definition.categories = categories;
                self.current.store(Arc::new(catalog));
            }
            None => log::debug!("saved categories for unregistered language {language}"),
        }
        Ok(())
    }
}

// --- Definition-building helpers for the per-language modules ---

pub(super) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Keyword button: inserts the word plus a trailing space.
pub(super) fn word_button(word: &str) -> KeyboardButton {
    KeyboardButton::new(word, word, format!("{word} "))
}

/// Operator or value button: inserts exactly its label.
pub(super) fn symbol_button(symbol: &str) -> KeyboardButton {
    KeyboardButton::new(symbol, symbol, symbol)
}

pub(super) fn sequences(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries.iter().map(|(key, row)| ((*key).to_owned(), strings(row))).collect()
}

pub(super) fn starters(entries: &[(&str, f32)]) -> HashMap<String, f32> {
    entries.iter().map(|(label, weight)| ((*label).to_owned(), *weight)).collect()
}

pub(super) fn placeholders(
    entries: &[(TemplateMatchType, &[&str])],
) -> HashMap<TemplateMatchType, Vec<String>> {
    entries.iter().map(|(kind, values)| (*kind, strings(values))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn tiny_language(key: &str, extension: &str) -> LanguageDefinition {
        LanguageDefinition {
            key: key.to_owned(),
            file_extensions: vec![extension.to_owned()],
            categories: vec![],
            sequences: HashMap::new(),
            starters: HashMap::new(),
            syntax: SyntaxRules::default(),
            placeholders: HashMap::new(),
            membership_keyword: None,
            block_opener: None,
            control_keywords: vec![],
        }
    }

    #[test]
    fn builtin_catalog_registers_python_first() {
        let catalog = builtin();
        let keys: Vec<&str> = catalog.languages().iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["python", "cpp", "javascript"]);
        assert_eq!(catalog.default_language().map(|l| l.key.as_str()), Some("python"));
    }

    #[test]
    fn extension_lookup_is_case_insensitive_with_fallback() {
        let catalog = builtin();
        assert_eq!(
            catalog.language_for_extension("PY").map(|l| l.key.as_str()),
            Some("python")
        );
        assert_eq!(
            catalog.language_for_extension(".cpp").map(|l| l.key.as_str()),
            Some("cpp")
        );
        assert_eq!(
            catalog.language_for_extension("xyz").map(|l| l.key.as_str()),
            Some("python"),
            "unknown extensions fall back to the default language"
        );
        assert_eq!(catalog.language_for_extension("").map(|l| l.key.as_str()), Some("python"));
    }

    #[test]
    fn empty_catalog_has_no_language_to_offer() {
        let catalog = LanguageCatalog::new(vec![]);
        assert!(catalog.language_for_extension("py").is_none());
        assert!(catalog.default_language().is_none());
    }

    #[test]
    fn candidate_pool_deduplicates_by_first_label() {
        let mut language = tiny_language("demo", "demo");
        language.categories = vec![
            SnippetCategory {
                name: "a".to_owned(),
                buttons: vec![
                    KeyboardButton::new("one", "x", "x-from-a"),
                    KeyboardButton::new("two", "y", "y"),
                ],
            },
            SnippetCategory {
                name: "b".to_owned(),
                buttons: vec![KeyboardButton::new("three", "x", "x-from-b")],
            },
        ];
        let pool = language.candidate_pool();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].text, "x-from-a", "first occurrence wins");
    }

    #[test]
    fn every_builtin_pool_is_free_of_duplicate_labels() {
        for language in builtin().languages() {
            let pool = language.candidate_pool();
            let mut labels: Vec<&str> = pool.iter().map(|b| b.label.as_str()).collect();
            labels.sort_unstable();
            let before = labels.len();
            labels.dedup();
            assert_eq!(before, labels.len(), "duplicate label in {}", language.key);
        }
    }

    #[test]
    fn control_header_detection_requires_whole_words() {
        let python = builtin().language("python").cloned().expect("python");
        assert!(python.is_control_header("if x == 1"));
        assert!(python.is_control_header("    for i in xs"));
        assert!(python.is_control_header("else"));
        assert!(!python.is_control_header("ifx = 1"));
        assert!(!python.is_control_header("x = 1"));
    }

    #[tokio::test]
    async fn customizations_survive_a_new_service() {
        let store = Arc::new(MemoryStore::new());
        let service = CatalogService::new(builtin(), Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let custom = vec![SnippetCategory {
            name: "mine".to_owned(),
            buttons: vec![KeyboardButton::new("fav", "fav", "favorite()")],
        }];
        service.save_categories("python", custom.clone()).await.expect("save");
        assert_eq!(
            service.catalog().language("python").expect("python").categories,
            custom
        );

        let fresh = CatalogService::new(builtin(), store as Arc<dyn KeyValueStore>);
        fresh.apply_saved().await;
        assert_eq!(
            fresh.catalog().language("python").expect("python").categories,
            custom
        );
        assert!(
            !fresh.catalog().language("cpp").expect("cpp").categories.is_empty(),
            "languages without a saved blob keep their built-in tabs"
        );
    }

    /// Store that parks reads of one key until the test opens the gate, and
    /// signals once a reader is parked.
    struct GatedStore {
        inner: MemoryStore,
        gated_key: &'static str,
        parked: tokio::sync::Semaphore,
        gate: tokio::sync::Semaphore,
    }

    impl GatedStore {
        fn new(gated_key: &'static str) -> Self {
            Self {
                inner: MemoryStore::new(),
                gated_key,
                parked: tokio::sync::Semaphore::new(0),
                gate: tokio::sync::Semaphore::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl KeyValueStore for GatedStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if key == self.gated_key {
                self.parked.add_permits(1);
                self.gate.acquire().await.expect("gate open").forget();
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn confirmed_save_survives_a_concurrent_apply_saved() {
        let store = Arc::new(GatedStore::new("catalog.cpp"));
        let service = Arc::new(CatalogService::new(
            builtin(),
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
        ));

        // Park the reload mid-way through its storage reads.
        let reload = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.apply_saved().await }
        });
        store.parked.acquire().await.expect("reload parked").forget();

        // A save issued while the reload is in flight must not be reverted
        // when the reload swaps its snapshot in.
        let custom = vec![SnippetCategory {
            name: "mine".to_owned(),
            buttons: vec![KeyboardButton::new("fav", "fav", "favorite()")],
        }];
        let save = tokio::spawn({
            let service = Arc::clone(&service);
            let custom = custom.clone();
            async move { service.save_categories("python", custom).await }
        });
        tokio::task::yield_now().await;
        store.gate.add_permits(1);

        reload.await.expect("reload task");
        save.await.expect("save task").expect("save");
        assert_eq!(
            service.catalog().language("python").expect("python").categories,
            custom
        );
    }

    #[tokio::test]
    async fn malformed_customization_blob_keeps_builtin_tabs() {
        let store = Arc::new(MemoryStore::new());
        store.set("catalog.python", "[{broken").await.expect("set");

        let service = CatalogService::new(builtin(), store as Arc<dyn KeyValueStore>);
        service.apply_saved().await;
        let catalog = service.catalog();
        let python = catalog.language("python").expect("python");
        assert!(!python.categories.is_empty());
    }
}
