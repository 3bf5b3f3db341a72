use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::store::{BatchOp, DocumentStore, StoreError};

/// Collection holding one document per section row.
const ROWS_COLLECTION: &str = "section_rows";

/// Settings document carrying section metadata (labels, field schemas).
const SECTIONS_DOC: &str = "disclosure";

/// Operations per committed batch. The store's hard per-transaction cap
/// is 500; 450 leaves a safety margin.
pub const MAX_BATCH_OPS: usize = 450;

/// One column of a section's row schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_field_kind", rename = "type")]
    pub kind: String,
}

fn default_field_kind() -> String {
    "text".to_string()
}

impl FieldSpec {
    /// Derive a missing id from the label, the way the editor does.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() && !self.label.is_empty() {
            self.id = self
                .label
                .to_lowercase()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect::<String>()
                .split('_')
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("_");
        }
    }
}

/// Section metadata stored separately from row data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionMeta {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_enabled() -> bool {
    true
}

/// Normalize edited rows to positional arrays matching `fields` order.
///
/// Positional rows pass through untouched. Keyed rows are projected onto
/// the field order, looking up each cell by field id first and field
/// label second, with missing values defaulting to an empty string.
/// Anything else becomes a row of empty strings; malformed input never
/// raises.
pub fn normalize_rows(rows: &[Value], fields: &[FieldSpec]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| match row {
            Value::Array(cells) => cells.clone(),
            Value::Object(map) => fields
                .iter()
                .map(|field| {
                    if !field.id.is_empty() {
                        if let Some(v) = map.get(&field.id) {
                            return v.clone();
                        }
                    }
                    if !field.label.is_empty() {
                        if let Some(v) = map.get(&field.label) {
                            return v.clone();
                        }
                    }
                    Value::String(String::new())
                })
                .collect(),
            _ => vec![Value::String(String::new()); fields.len()],
        })
        .collect()
}

/// Writes section rows and metadata back to the remote store.
///
/// Not safe for concurrent saves of the same section: callers serialize
/// edits per section (the panel disables the save control while a save
/// is in flight). A failure mid-sequence is surfaced as-is; batches
/// already committed are not rolled back.
pub struct SectionWriter<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> SectionWriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Replace all stored rows for `section_id` with `rows`, normalized
    /// against `fields`. Deletes run first so no orphaned row documents
    /// survive a shrink; deletes and writes are each committed in
    /// batches of at most [`MAX_BATCH_OPS`].
    pub async fn save_section_rows(
        &self,
        section_id: &str,
        rows: &[Value],
        fields: &[FieldSpec],
    ) -> Result<(), StoreError> {
        let existing = self.store.list_documents(ROWS_COLLECTION).await?;
        let deletes: Vec<BatchOp> = existing
            .into_iter()
            .filter(|doc| doc.data.get("sectionId").and_then(Value::as_str) == Some(section_id))
            .map(|doc| BatchOp::Delete {
                collection: ROWS_COLLECTION.to_string(),
                id: doc.id,
            })
            .collect();
        debug!(section = section_id, count = deletes.len(), "Deleting existing rows");
        self.commit_chunked(deletes).await?;

        let normalized = normalize_rows(rows, fields);
        let writes: Vec<BatchOp> = normalized
            .into_iter()
            .enumerate()
            .map(|(index, values)| BatchOp::Set {
                collection: ROWS_COLLECTION.to_string(),
                id: format!("{}_row_{}", section_id, index),
                data: json!({
                    "sectionId": section_id,
                    "rowIndex": index,
                    "values": values,
                }),
            })
            .collect();
        let row_count = writes.len();
        self.commit_chunked(writes).await?;

        info!(section = section_id, rows = row_count, "Section rows saved");
        Ok(())
    }

    /// Merge section metadata (labels, enabled flags, field schemas -
    /// never row data) into the sections settings document, leaving
    /// unrelated fields of that document intact.
    pub async fn save_section_meta(&self, sections: &[SectionMeta]) -> Result<(), StoreError> {
        let mut sections = sections.to_vec();
        for section in &mut sections {
            for field in &mut section.fields {
                field.ensure_id();
            }
        }

        self.store
            .merge_document(
                crate::content::SETTINGS_COLLECTION,
                SECTIONS_DOC,
                json!({ "sections": sections }),
            )
            .await
    }

    async fn commit_chunked(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        for chunk in ops.chunks(MAX_BATCH_OPS) {
            self.store.commit(chunk.to_vec()).await?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn fields(ids: &[&str]) -> Vec<FieldSpec> {
        ids.iter()
            .map(|id| FieldSpec {
                id: id.to_string(),
                label: String::new(),
                kind: "text".to_string(),
            })
            .collect()
    }

    #[test]
    fn rows_normalize_to_positional_arrays() {
        let rows = vec![
            json!(["A", "1"]),
            json!({"id": "x", "name": "B"}),
            json!({"garbage": true}),
        ];
        let normalized = normalize_rows(&rows, &fields(&["name", "age"]));
        assert_eq!(
            normalized,
            vec![
                vec![json!("A"), json!("1")],
                vec![json!("B"), json!("")],
                vec![json!(""), json!("")],
            ]
        );
    }

    #[test]
    fn keyed_rows_fall_back_to_field_labels() {
        let schema = vec![FieldSpec {
            id: "name".to_string(),
            label: "Name".to_string(),
            kind: "text".to_string(),
        }];
        let normalized = normalize_rows(&[json!({"Name": "Bob"})], &schema);
        assert_eq!(normalized, vec![vec![json!("Bob")]]);
    }

    #[test]
    fn field_ids_derive_from_labels() {
        let mut field = FieldSpec {
            id: String::new(),
            label: "Fee Structure (2025)".to_string(),
            kind: "text".to_string(),
        };
        field.ensure_id();
        assert_eq!(field.id, "fee_structure_2025");
    }

    #[tokio::test]
    async fn thousand_rows_split_into_bounded_batches() {
        let store = MemoryStore::new();
        // Pre-existing rows for the section, to exercise the delete path.
        for i in 0..1000 {
            store.insert(
                "section_rows",
                &format!("fees_row_{}", i),
                json!({"sectionId": "fees", "rowIndex": i, "values": ["old"]}),
            );
        }

        let rows: Vec<Value> = (0..1000).map(|i| json!([format!("row {}", i)])).collect();
        let writer = SectionWriter::new(&store);
        writer
            .save_section_rows("fees", &rows, &fields(&["item"]))
            .await
            .unwrap();

        let sizes = store.commit_sizes();
        // 1000 deletes and 1000 writes, each split into 450/450/100.
        assert_eq!(sizes, vec![450, 450, 100, 450, 450, 100]);
        assert!(sizes.iter().all(|&s| s <= MAX_BATCH_OPS));
        assert_eq!(store.document_count("section_rows"), 1000);
    }

    #[tokio::test]
    async fn replacing_rows_leaves_no_orphans_from_other_shapes() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert(
                "section_rows",
                &format!("fees_row_{}", i),
                json!({"sectionId": "fees", "rowIndex": i, "values": ["old"]}),
            );
        }
        // A row belonging to another section must survive.
        store.insert(
            "section_rows",
            "staff_row_0",
            json!({"sectionId": "staff", "rowIndex": 0, "values": ["keep"]}),
        );

        let writer = SectionWriter::new(&store);
        writer
            .save_section_rows("fees", &[json!(["new"])], &fields(&["item"]))
            .await
            .unwrap();

        assert_eq!(store.document_count("section_rows"), 2);
        let kept = store
            .get_document("section_rows", "staff_row_0")
            .await
            .unwrap();
        assert!(kept.is_some());
        let row = store
            .get_document("section_rows", "fees_row_0")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["values"], json!(["new"]));
    }

    #[tokio::test]
    async fn metadata_merge_preserves_unrelated_settings_fields() {
        let store = MemoryStore::new();
        store.insert("settings", "disclosure", json!({"theme": "blue"}));

        let writer = SectionWriter::new(&store);
        writer
            .save_section_meta(&[SectionMeta {
                id: "fees".to_string(),
                label: "Fee Structure".to_string(),
                enabled: true,
                fields: fields(&["item"]),
            }])
            .await
            .unwrap();

        let doc = store
            .get_document("settings", "disclosure")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["theme"], "blue");
        assert_eq!(doc["sections"][0]["id"], "fees");
    }
}
