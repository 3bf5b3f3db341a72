use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacultyMember {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_faculty_name")]
    pub name: String,
    #[serde(default = "default_faculty_role")]
    pub role: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_faculty_name() -> String {
    "Faculty Member".to_string()
}

fn default_faculty_role() -> String {
    "Staff".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculty_member_defaults_applied_for_sparse_document() {
        let member: FacultyMember = serde_json::from_str(r#"{"id": "f1"}"#).unwrap();
        assert_eq!(member.name, "Faculty Member");
        assert_eq!(member.role, "Staff");
        assert!(member.photo.is_none());
    }
}
