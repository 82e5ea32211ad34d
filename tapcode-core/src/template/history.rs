//! Most-recently-first history of confirmed placeholder values.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::TemplateMatchType;
use crate::storage::KeyValueStore;

/// Storage key of the persisted history blob.
const HISTORY_KEY: &str = "template_history";

/// Per-bucket retention.
const HISTORY_CAP: usize = 20;

/// Confirmed placeholder values, newest first, one bucket per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateHistory {
    functions: Vec<String>,
    classes: Vec<String>,
    variables: Vec<String>,
    conditions: Vec<String>,
    modules: Vec<String>,
    types: Vec<String>,
}

impl TemplateHistory {
    /// Starter history shipped with the app; real confirmations push these
    /// out over time.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            functions: vec!["main".to_owned()],
            classes: vec!["MyClass".to_owned()],
            variables: vec!["x".to_owned(), "i".to_owned(), "count".to_owned()],
            conditions: vec!["x > 0".to_owned()],
            modules: vec!["math".to_owned()],
            types: vec!["int".to_owned()],
        }
    }

    #[must_use]
    pub fn bucket(&self, kind: TemplateMatchType) -> &[String] {
        match kind {
            TemplateMatchType::Function => &self.functions,
            TemplateMatchType::Class => &self.classes,
            TemplateMatchType::Variable => &self.variables,
            TemplateMatchType::Condition => &self.conditions,
            TemplateMatchType::Module => &self.modules,
            TemplateMatchType::Type => &self.types,
        }
    }

    fn bucket_mut(&mut self, kind: TemplateMatchType) -> &mut Vec<String> {
        match kind {
            TemplateMatchType::Function => &mut self.functions,
            TemplateMatchType::Class => &mut self.classes,
            TemplateMatchType::Variable => &mut self.variables,
            TemplateMatchType::Condition => &mut self.conditions,
            TemplateMatchType::Module => &mut self.modules,
            TemplateMatchType::Type => &mut self.types,
        }
    }

    /// Records a confirmed value; returns whether the history changed.
    ///
    /// Empty and whitespace-only values are rejected. A value already in the
    /// bucket keeps its position; only new values go to the front, and the
    /// bucket is capped at twenty entries.
    pub fn record(&mut self, kind: TemplateMatchType, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let bucket = self.bucket_mut(kind);
        if bucket.iter().any(|v| v == value) {
            return false;
        }
        bucket.insert(0, value.to_owned());
        bucket.truncate(HISTORY_CAP);
        true
    }

    fn from_blob(blob: HistoryBlob, seed: Self) -> Self {
        Self {
            functions: blob.functions.unwrap_or(seed.functions),
            classes: blob.classes.unwrap_or(seed.classes),
            variables: blob.variables.unwrap_or(seed.variables),
            conditions: blob.conditions.unwrap_or(seed.conditions),
            modules: blob.modules.unwrap_or(seed.modules),
            types: blob.types.unwrap_or(seed.types),
        }
    }

    fn to_blob(&self) -> HistoryBlob {
        HistoryBlob {
            functions: Some(self.functions.clone()),
            classes: Some(self.classes.clone()),
            variables: Some(self.variables.clone()),
            conditions: Some(self.conditions.clone()),
            modules: Some(self.modules.clone()),
            types: Some(self.types.clone()),
        }
    }
}

/// Wire form of the persisted blob. Buckets are optional so blobs written by
/// older versions keep their seeds for kinds they predate.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryBlob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    types: Option<Vec<String>>,
}

/// The history plus its persistence.
///
/// One async mutex is held across both the in-memory append and the storage
/// write, so concurrent confirmations cannot lose updates.
pub struct TemplateHistoryStore {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<TemplateHistory>,
}

impl TemplateHistoryStore {
    /// Loads saved history from `store`, merged over the built-in seeds
    /// bucket by bucket.
    ///
    /// A missing key, a malformed blob, or a failing store all fall back to
    /// the seeds with a logged warning; loading never fails.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let history = match store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<HistoryBlob>(&raw) {
                Ok(blob) => TemplateHistory::from_blob(blob, TemplateHistory::seed()),
                Err(err) => {
                    log::warn!("malformed template history, using seeds: {err}");
                    TemplateHistory::seed()
                }
            },
            Ok(None) => TemplateHistory::seed(),
            Err(err) => {
                log::warn!("template history unavailable, using seeds: {err}");
                TemplateHistory::seed()
            }
        };
        Self { store, state: Mutex::new(history) }
    }

    /// Current snapshot.
    pub async fn history(&self) -> TemplateHistory {
        self.state.lock().await.clone()
    }

    /// Records a confirmed placeholder value and persists the updated blob.
    ///
    /// Rejected and duplicate values change nothing and write nothing.
    /// Persistence failures are logged and swallowed; the in-memory history
    /// keeps the value either way.
    pub async fn record_confirmed(&self, kind: TemplateMatchType, value: &str) {
        let mut state = self.state.lock().await;
        if !state.record(kind, value) {
            return;
        }
        match serde_json::to_string(&state.to_blob()) {
            Ok(raw) => {
                if let Err(err) = self.store.set(HISTORY_KEY, &raw).await {
                    log::warn!("could not persist template history: {err}");
                }
            }
            Err(err) => log::warn!("could not encode template history: {err}"),
        }
    }

    /// Suggestions for `kind`: canonical values from `language`, then
    /// history values not already present.
    pub async fn suggestions(
        &self,
        kind: TemplateMatchType,
        language: &crate::catalog::LanguageDefinition,
    ) -> Vec<String> {
        let state = self.state.lock().await;
        super::suggestions_for(kind, language, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    struct FailingStore;

    #[async_trait::async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("set rejected".to_owned()))
        }
        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("remove rejected".to_owned()))
        }
    }

    #[test]
    fn rejects_empty_and_whitespace_values() {
        let mut history = TemplateHistory::default();
        assert!(!history.record(TemplateMatchType::Variable, ""));
        assert!(!history.record(TemplateMatchType::Variable, "   "));
        assert!(history.bucket(TemplateMatchType::Variable).is_empty());
    }

    #[test]
    fn duplicates_keep_their_position() {
        let mut history = TemplateHistory::default();
        assert!(history.record(TemplateMatchType::Function, "alpha"));
        assert!(history.record(TemplateMatchType::Function, "beta"));
        assert!(!history.record(TemplateMatchType::Function, "alpha"));
        assert_eq!(history.bucket(TemplateMatchType::Function), ["beta", "alpha"]);
    }

    #[test]
    fn cap_evicts_the_oldest_entries() {
        let mut history = TemplateHistory::default();
        for n in 0..25 {
            assert!(history.record(TemplateMatchType::Variable, &format!("v{n}")));
        }
        let bucket = history.bucket(TemplateMatchType::Variable);
        assert_eq!(bucket.len(), 20);
        assert_eq!(bucket[0], "v24");
        assert_eq!(bucket[19], "v5");
        assert!(!bucket.iter().any(|v| v == "v0" || v == "v4"));
    }

    #[test]
    fn values_are_trimmed_before_recording() {
        let mut history = TemplateHistory::default();
        assert!(history.record(TemplateMatchType::Module, "  math  "));
        assert!(!history.record(TemplateMatchType::Module, "math"));
        assert_eq!(history.bucket(TemplateMatchType::Module), ["math"]);
    }

    #[test]
    fn partial_blob_keeps_seeds_for_missing_buckets() {
        let blob: HistoryBlob =
            serde_json::from_str(r#"{"functions":["setup"]}"#).expect("valid blob");
        let merged = TemplateHistory::from_blob(blob, TemplateHistory::seed());
        assert_eq!(merged.bucket(TemplateMatchType::Function), ["setup"]);
        assert_eq!(
            merged.bucket(TemplateMatchType::Module),
            TemplateHistory::seed().bucket(TemplateMatchType::Module)
        );
    }

    #[tokio::test]
    async fn records_persist_and_reload() {
        let store = Arc::new(MemoryStore::new());
        let history = TemplateHistoryStore::load(Arc::clone(&store) as Arc<dyn KeyValueStore>).await;
        history.record_confirmed(TemplateMatchType::Class, "Rocket").await;

        let reloaded = TemplateHistoryStore::load(store as Arc<dyn KeyValueStore>).await;
        let snapshot = reloaded.history().await;
        assert_eq!(snapshot.bucket(TemplateMatchType::Class)[0], "Rocket");
    }

    #[tokio::test]
    async fn malformed_blob_falls_back_to_seeds() {
        let store = Arc::new(MemoryStore::new());
        store.set(HISTORY_KEY, "{ not json").await.expect("memory set");
        let history = TemplateHistoryStore::load(store as Arc<dyn KeyValueStore>).await;
        assert_eq!(history.history().await, TemplateHistory::seed());
    }

    #[tokio::test]
    async fn failed_persist_still_updates_memory() {
        let history = TemplateHistoryStore::load(Arc::new(FailingStore) as Arc<dyn KeyValueStore>).await;
        history.record_confirmed(TemplateMatchType::Variable, "total").await;
        let snapshot = history.history().await;
        assert_eq!(snapshot.bucket(TemplateMatchType::Variable)[0], "total");
    }
}
