use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl GalleryImage {
    /// Alt text for rendering, with the generic fallback the site uses.
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("Gallery image")
    }
}
