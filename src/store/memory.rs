//! In-memory document store for tests and offline operation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{BatchOp, Document, DocumentStore, StoreError};

/// `DocumentStore` backed by nested maps. Collections and documents are
/// kept in insertion-stable order so scans are deterministic in tests.
///
/// Committed batch sizes are recorded so callers can assert on batching
/// behavior without touching a real store.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, BTreeMap<String, Value>>>,
    commit_sizes: Mutex<Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document directly, outside of any batch.
    pub fn insert(&self, collection: &str, id: &str, data: Value) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
    }

    pub fn document_count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).map_or(0, |c| c.len())
    }

    /// Sizes of every batch committed so far, in order.
    pub fn commit_sizes(&self) -> Vec<usize> {
        self.commit_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|c| {
                c.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let doc = collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| Value::Object(Default::default()));

        match (doc, data) {
            (Value::Object(existing), Value::Object(incoming)) => {
                for (k, v) in incoming {
                    existing.insert(k, v);
                }
                Ok(())
            }
            (doc, data) => {
                *doc = data;
                Ok(())
            }
        }
    }

    async fn commit(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        self.commit_sizes.lock().unwrap().push(ops.len());

        let mut collections = self.collections.lock().unwrap();
        for op in ops {
            match op {
                BatchOp::Set {
                    collection,
                    id,
                    data,
                } => {
                    collections.entry(collection).or_default().insert(id, data);
                }
                BatchOp::Delete { collection, id } => {
                    if let Some(c) = collections.get_mut(&collection) {
                        c.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn merge_preserves_unrelated_fields() {
        let store = MemoryStore::new();
        store.insert("settings", "contact", json!({"phone": "123", "hours": "9-4"}));

        store
            .merge_document("settings", "contact", json!({"phone": "456"}))
            .await
            .unwrap();

        let doc = store.get_document("settings", "contact").await.unwrap().unwrap();
        assert_eq!(doc["phone"], "456");
        assert_eq!(doc["hours"], "9-4");
    }

    #[tokio::test]
    async fn missing_document_reads_as_none() {
        let store = MemoryStore::new();
        assert!(store.get_document("settings", "hero").await.unwrap().is_none());
        assert!(store.list_documents("faculty").await.unwrap().is_empty());
    }
}
