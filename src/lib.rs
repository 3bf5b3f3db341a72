//! campuscache - content cache and invalidation layer for a school site.
//!
//! Eleven named content types (faculty, testimonials, gallery, events,
//! hero, about, academics, logo, school-info, contact, faq) live in a
//! remote document store and are cached in local key-value storage with
//! a TTL. A per-type remote "last updated" marker, written by the admin
//! panel, invalidates caches early so edits propagate without waiting
//! out the TTL. The admin path persists edited section rows back to the
//! store in bounded batches.
//!
//! Rendering is a collaborator, not a concern: loaders hand back typed
//! payloads (or per-type fallback sentinels) and never touch
//! presentation.

pub mod admin;
pub mod cache;
pub mod config;
pub mod content;
pub mod models;
pub mod store;

pub use cache::{CacheManager, SessionState, SECTION_TTL, TICKER_TTL};
pub use config::Config;
pub use content::{ContentType, Payload};
