use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub order: i64,
}

/// Sort FAQ entries into display order. Entries without an explicit
/// order share position 0 and keep their fetch order among themselves.
pub fn sort_for_display(entries: &mut [FaqEntry]) {
    entries.sort_by_key(|e| e.order);
}
