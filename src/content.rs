//! Content type registry and per-type payloads.
//!
//! Every editable site section is one `ContentType`. A type maps to one
//! remote collection or settings document and owns a disjoint pair of
//! local cache keys, which is what makes concurrent loads of different
//! types safe.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{
    AboutSettings, AcademicsSettings, ContactSettings, FacultyMember, FaqEntry, GalleryImage,
    HeroSettings, LogoSettings, Notice, SchoolInfo, Testimonial,
};
use crate::store::Document;

/// Collection name for singleton settings documents.
pub const SETTINGS_COLLECTION: &str = "settings";

/// How a content type is laid out in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// A whole collection, scanned in full.
    Collection,
    /// A single document in the `settings` collection.
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Faculty,
    Testimonials,
    Gallery,
    Events,
    Hero,
    About,
    Academics,
    Logo,
    SchoolInfo,
    Contact,
    Faq,
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::Faculty,
        ContentType::Testimonials,
        ContentType::Gallery,
        ContentType::Events,
        ContentType::Hero,
        ContentType::About,
        ContentType::Academics,
        ContentType::Logo,
        ContentType::SchoolInfo,
        ContentType::Contact,
        ContentType::Faq,
    ];

    /// Stable name used for remote collections/documents and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Faculty => "faculty",
            ContentType::Testimonials => "testimonials",
            ContentType::Gallery => "gallery",
            ContentType::Events => "events",
            ContentType::Hero => "hero",
            ContentType::About => "about",
            ContentType::Academics => "academics",
            ContentType::Logo => "logo",
            ContentType::SchoolInfo => "school-info",
            ContentType::Contact => "contact",
            ContentType::Faq => "faq",
        }
    }

    pub fn storage_kind(&self) -> StorageKind {
        match self {
            ContentType::Faculty
            | ContentType::Testimonials
            | ContentType::Gallery
            | ContentType::Events
            | ContentType::Faq => StorageKind::Collection,
            ContentType::Hero
            | ContentType::About
            | ContentType::Academics
            | ContentType::Logo
            | ContentType::SchoolInfo
            | ContentType::Contact => StorageKind::Settings,
        }
    }

    /// Local storage key for the serialized payload.
    pub fn data_key(&self) -> String {
        format!("{}.data", self.as_str())
    }

    /// Local storage key for the fetch timestamp (epoch millis).
    pub fn time_key(&self) -> String {
        format!("{}.fetched_at", self.as_str())
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for one content type, validated at the cache boundary.
///
/// Collection types carry a list; settings types carry an optional
/// document (`None` means "no content configured" and the renderer keeps
/// its static defaults).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Payload {
    Faculty(Vec<FacultyMember>),
    Testimonials(Vec<Testimonial>),
    Gallery(Vec<GalleryImage>),
    Events(Vec<Notice>),
    Faq(Vec<FaqEntry>),
    Hero(Option<HeroSettings>),
    About(Option<AboutSettings>),
    Academics(Option<AcademicsSettings>),
    Logo(Option<LogoSettings>),
    SchoolInfo(Option<SchoolInfo>),
    Contact(Option<ContactSettings>),
}

impl Payload {
    pub fn content_type(&self) -> ContentType {
        match self {
            Payload::Faculty(_) => ContentType::Faculty,
            Payload::Testimonials(_) => ContentType::Testimonials,
            Payload::Gallery(_) => ContentType::Gallery,
            Payload::Events(_) => ContentType::Events,
            Payload::Faq(_) => ContentType::Faq,
            Payload::Hero(_) => ContentType::Hero,
            Payload::About(_) => ContentType::About,
            Payload::Academics(_) => ContentType::Academics,
            Payload::Logo(_) => ContentType::Logo,
            Payload::SchoolInfo(_) => ContentType::SchoolInfo,
            Payload::Contact(_) => ContentType::Contact,
        }
    }

    /// The sentinel returned when a fetch fails or nothing is configured:
    /// empty list for collections, `None` for settings documents.
    pub fn fallback(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Faculty => Payload::Faculty(Vec::new()),
            ContentType::Testimonials => Payload::Testimonials(Vec::new()),
            ContentType::Gallery => Payload::Gallery(Vec::new()),
            ContentType::Events => Payload::Events(Vec::new()),
            ContentType::Faq => Payload::Faq(Vec::new()),
            ContentType::Hero => Payload::Hero(None),
            ContentType::About => Payload::About(None),
            ContentType::Academics => Payload::Academics(None),
            ContentType::Logo => Payload::Logo(None),
            ContentType::SchoolInfo => Payload::SchoolInfo(None),
            ContentType::Contact => Payload::Contact(None),
        }
    }

    /// Validate a collection scan into a typed payload. Documents that
    /// fail validation are skipped with a warning rather than failing the
    /// whole section.
    pub fn from_collection(content_type: ContentType, docs: Vec<Document>) -> Self {
        match content_type {
            ContentType::Faculty => Payload::Faculty(collect_items(content_type, docs)),
            ContentType::Testimonials => Payload::Testimonials(collect_items(content_type, docs)),
            ContentType::Gallery => Payload::Gallery(collect_items(content_type, docs)),
            ContentType::Events => Payload::Events(collect_items(content_type, docs)),
            ContentType::Faq => {
                let mut entries: Vec<FaqEntry> = collect_items(content_type, docs);
                crate::models::faq::sort_for_display(&mut entries);
                Payload::Faq(entries)
            }
            _ => Payload::fallback(content_type),
        }
    }

    /// Validate a settings document into a typed payload.
    pub fn from_settings(content_type: ContentType, doc: Value) -> Self {
        match content_type {
            ContentType::Hero => Payload::Hero(parse_settings(content_type, doc)),
            ContentType::About => Payload::About(parse_settings(content_type, doc)),
            ContentType::Academics => Payload::Academics(parse_settings(content_type, doc)),
            ContentType::Logo => Payload::Logo(parse_settings(content_type, doc)),
            ContentType::SchoolInfo => Payload::SchoolInfo(parse_settings(content_type, doc)),
            ContentType::Contact => Payload::Contact(parse_settings(content_type, doc)),
            _ => Payload::fallback(content_type),
        }
    }

    /// Whether this payload is the type's fallback sentinel.
    pub fn is_fallback(&self) -> bool {
        match self {
            Payload::Faculty(v) => v.is_empty(),
            Payload::Testimonials(v) => v.is_empty(),
            Payload::Gallery(v) => v.is_empty(),
            Payload::Events(v) => v.is_empty(),
            Payload::Faq(v) => v.is_empty(),
            Payload::Hero(v) => v.is_none(),
            Payload::About(v) => v.is_none(),
            Payload::Academics(v) => v.is_none(),
            Payload::Logo(v) => v.is_none(),
            Payload::SchoolInfo(v) => v.is_none(),
            Payload::Contact(v) => v.is_none(),
        }
    }

    /// Number of items for collection payloads; `None` for settings
    /// payloads, which hold a document rather than a list.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            Payload::Faculty(v) => Some(v.len()),
            Payload::Testimonials(v) => Some(v.len()),
            Payload::Gallery(v) => Some(v.len()),
            Payload::Events(v) => Some(v.len()),
            Payload::Faq(v) => Some(v.len()),
            _ => None,
        }
    }
}

fn collect_items<T: serde::de::DeserializeOwned>(
    content_type: ContentType,
    docs: Vec<Document>,
) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| {
            // Carry the document id into the item, matching how scans
            // merge `{id, ...data}` on the site.
            let mut data = doc.data;
            if let Value::Object(ref mut map) = data {
                map.entry("id".to_string())
                    .or_insert_with(|| Value::String(doc.id.clone()));
            }
            match serde_json::from_value(data) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(content_type = %content_type, doc = %doc.id, error = %e,
                        "Skipping malformed document");
                    None
                }
            }
        })
        .collect()
}

fn parse_settings<T: serde::de::DeserializeOwned>(
    content_type: ContentType,
    doc: Value,
) -> Option<T> {
    match serde_json::from_value(doc) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(content_type = %content_type, error = %e, "Malformed settings document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_type_owns_a_disjoint_key_pair() {
        let mut keys = std::collections::HashSet::new();
        for t in ContentType::ALL {
            assert!(keys.insert(t.data_key()));
            assert!(keys.insert(t.time_key()));
        }
        assert_eq!(keys.len(), ContentType::ALL.len() * 2);
    }

    #[test]
    fn collection_scan_skips_malformed_documents() {
        let docs = vec![
            Document { id: "f1".into(), data: json!({"name": "A. Rao", "role": "Principal"}) },
            Document { id: "f2".into(), data: json!("not an object") },
        ];
        let Payload::Faculty(members) = Payload::from_collection(ContentType::Faculty, docs)
        else {
            panic!("wrong payload variant");
        };
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "f1");
    }

    #[test]
    fn faq_scan_comes_back_sorted() {
        let docs = vec![
            Document { id: "q2".into(), data: json!({"question": "B?", "order": 2}) },
            Document { id: "q1".into(), data: json!({"question": "A?", "order": 1}) },
        ];
        let Payload::Faq(entries) = Payload::from_collection(ContentType::Faq, docs) else {
            panic!("wrong payload variant");
        };
        assert_eq!(entries[0].question, "A?");
    }

    #[test]
    fn item_count_applies_to_collection_payloads_only() {
        assert_eq!(Payload::Faculty(Vec::new()).item_count(), Some(0));
        assert_eq!(Payload::Events(Vec::new()).item_count(), Some(0));
        assert_eq!(Payload::Hero(None).item_count(), None);
        assert_eq!(
            Payload::SchoolInfo(Some(SchoolInfo {
                name: "VPS".into(),
                address: String::new(),
                phone: String::new(),
                email: String::new(),
            }))
            .item_count(),
            None
        );
    }

    #[test]
    fn malformed_settings_document_becomes_none() {
        let payload = Payload::from_settings(ContentType::Hero, json!([1, 2, 3]));
        assert_eq!(payload, Payload::Hero(None));
    }

    #[test]
    fn payload_round_trips_through_json() {
        let payload = Payload::Hero(Some(HeroSettings {
            title: "Welcome".into(),
            subtitle: "Learning for life".into(),
            background_image: None,
        }));
        let text = serde_json::to_string(&payload).unwrap();
        let back: Payload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }
}
