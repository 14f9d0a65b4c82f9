use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form `key -> url` mapping stored as a JSON object.
pub type Links = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

/// A project with its skills embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub links: Links,
    pub skills: Vec<Skill>,
}

/// A profile with its skills and projects embedded, each project carrying its
/// own skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub education: String,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub links: Links,
}

/// Row of the top-skills aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillUsage {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    pub projects: Vec<Project>,
    pub profiles: Vec<Profile>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub links: Links,
    pub skill_ids: Vec<i64>,
}

/// Input for creating a profile.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub education: String,
    pub links: Links,
    pub skill_ids: Vec<i64>,
    pub project_ids: Vec<i64>,
}

/// Scalar profile fields after validation; every field is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
    pub education: String,
    pub links: Links,
}

/// Body of `PATCH`/`PUT /profile/{id}`. Absent fields deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub links: Option<Links>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_fields_in_declared_order() {
        let profile = Profile {
            id: 1,
            name: "You".into(),
            email: "you@example.com".into(),
            education: String::new(),
            skills: vec![Skill {
                id: 1,
                name: "python".into(),
            }],
            projects: vec![],
            links: Links::new(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"You","email":"you@example.com","education":"","skills":[{"id":1,"name":"python"}],"projects":[],"links":{}}"#
        );
    }

    #[test]
    fn update_body_accepts_partial_input() {
        let upd: ProfileUpdate = serde_json::from_str(r#"{"education":"M.S.","extra":1}"#).unwrap();
        assert_eq!(upd.education.as_deref(), Some("M.S."));
        assert!(upd.name.is_none());
        assert!(upd.links.is_none());
    }
}
