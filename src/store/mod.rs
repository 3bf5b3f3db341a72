//! Collaborator seams for the two storage backends.
//!
//! The cache layer talks to a remote document store (keyed collections,
//! point reads, full scans, batched writes) and a local string-only
//! key-value store. Both are traits so tests and offline operation can
//! substitute in-memory implementations.

pub mod error;
pub mod http;
pub mod local;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use error::StoreError;
pub use http::RestStore;
pub use local::{DiskStore, LocalStore, MemoryLocalStore};
pub use memory::MemoryStore;

/// One document from a collection scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// A single operation inside a batched commit.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Set {
        collection: String,
        id: String,
        data: Value,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Remote document store: keyed collections of JSON documents.
///
/// Point reads distinguish "document absent" (`Ok(None)`) from transport
/// failure (`Err`); callers rely on that to tell "no content configured"
/// apart from "store unreachable".
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Value>, StoreError>;

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Merge `data` into the document, preserving fields not named in it.
    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<(), StoreError>;

    /// Commit a batch of writes/deletes together. Callers are responsible
    /// for keeping batches under the store's per-transaction op limit.
    async fn commit(&self, ops: Vec<BatchOp>) -> Result<(), StoreError>;
}
