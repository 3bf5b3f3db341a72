//! Admin-side persistence for structured section content.
//!
//! The admin panel edits sections as ordered rows of typed fields. This
//! module normalizes edited rows into a consistent positional shape and
//! writes them back to the remote store in bounded batches.

pub mod writer;

pub use writer::{normalize_rows, FieldSpec, SectionMeta, SectionWriter, MAX_BATCH_OPS};
