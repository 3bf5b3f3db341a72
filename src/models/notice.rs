use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single entry in the events/notices feed.
///
/// `date` and `valid_until` are stored as the editor typed them
/// (`YYYY-MM-DD`); unparseable dates never fail a load, they just make
/// the notice permanently active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "validUntil")]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub category: NoticeCategory,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Urgent,
    Academic,
    Events,
    #[default]
    #[serde(other)]
    General,
}

impl std::fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeCategory::Urgent => write!(f, "urgent"),
            NoticeCategory::Academic => write!(f, "academic"),
            NoticeCategory::Events => write!(f, "events"),
            NoticeCategory::General => write!(f, "general"),
        }
    }
}

impl Notice {
    /// A notice with a `valid_until` date is active through the end of
    /// that day; without one it never expires.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.valid_until.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                    Ok(until) => until >= today,
                    Err(_) => true,
                }
            }
            _ => true,
        }
    }

    pub fn posted_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}
