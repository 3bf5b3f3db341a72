//! Singleton settings documents: one document per type under the
//! `settings` collection, edited as a whole from the admin panel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, rename = "backgroundImage")]
    pub background_image: Option<String>,
}

impl HeroSettings {
    /// Whether the hero carries a custom background image (blank strings
    /// from the editor count as absent).
    pub fn has_background_image(&self) -> bool {
        self.background_image
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AboutSettings {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub leadership: Vec<LeaderProfile>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcademicsSettings {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub curriculum: String,
    #[serde(default)]
    pub programs: String,
    #[serde(default)]
    pub assessment: String,
    #[serde(default)]
    pub extracurricular: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoSettings {
    #[serde(default, rename = "logoUrl")]
    pub logo_url: String,
    #[serde(default, rename = "schoolName")]
    pub school_name: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactSettings {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hours: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_blank_background_counts_as_absent() {
        let hero: HeroSettings =
            serde_json::from_str(r#"{"title": "Welcome", "backgroundImage": "  "}"#).unwrap();
        assert!(!hero.has_background_image());
    }

    #[test]
    fn about_settings_tolerates_missing_collections() {
        let about: AboutSettings = serde_json::from_str(r#"{"content": "est. 1985"}"#).unwrap();
        assert!(about.leadership.is_empty());
        assert!(about.highlights.is_empty());
    }
}
