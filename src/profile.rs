use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

static DEFAULT_PROFILE: &str = include_str!("default_profile.toml");

/// The canonical résumé record. List order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    // Plain values before tables, as TOML requires
    pub summary: String,
    pub courses: Vec<String>,
    pub languages: Vec<String>,
    pub additional: Vec<String>,
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub skills: SkillMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linkedin: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub github: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub portfolio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub achievements: Vec<String>,
}

impl Project {
    /// Text the project is matched against: name, description and technologies.
    pub fn relevance_text(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.description,
            self.technologies.join(" ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl Profile {
    /// The profile bundled with the binary, used when no profile file exists yet.
    pub fn builtin() -> Result<Self> {
        toml::from_str(DEFAULT_PROFILE).map_err(|e| Error::Profile {
            path: PathBuf::from("<built-in>"),
            reason: e.to_string(),
        })
    }
}

/// Skill categories in display order.
///
/// An insertion-ordered map: categories are unique and iteration yields them
/// in the order they were inserted (or read from disk). Equality is
/// order-sensitive.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SkillMap(IndexMap<String, Vec<String>>);

impl SkillMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category, replacing the skills of an existing one in place.
    /// Returns the previous skills if the category was already present.
    pub fn insert(&mut self, category: impl Into<String>, skills: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(category.into(), skills)
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with the categories named in `priority` first (in that order),
    /// followed by the remaining categories in their current order.
    /// Names in `priority` that are not present are ignored.
    pub fn reordered(&self, priority: &[&str]) -> SkillMap {
        let mut ordered = SkillMap::new();
        for category in priority {
            if let Some(skills) = self.0.get(*category) {
                ordered.insert(*category, skills.clone());
            }
        }
        for (category, skills) in &self.0 {
            if !ordered.contains(category) {
                ordered.insert(category.clone(), skills.clone());
            }
        }
        ordered
    }
}

impl PartialEq for SkillMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for SkillMap {}

impl<C: Into<String>> FromIterator<(C, Vec<String>)> for SkillMap {
    fn from_iter<I: IntoIterator<Item = (C, Vec<String>)>>(iter: I) -> Self {
        SkillMap(
            iter.into_iter()
                .map(|(category, skills)| (category.into(), skills))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for SkillMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SkillMapVisitor)
    }
}

struct SkillMapVisitor;

impl<'de> Visitor<'de> for SkillMapVisitor {
    type Value = SkillMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of skill category to a list of skills")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<SkillMap, A::Error> {
        let mut skills = SkillMap::new();
        while let Some((category, list)) = access.next_entry::<String, Vec<String>>()? {
            if skills.contains(&category) {
                return Err(de::Error::custom(format!(
                    "duplicate skill category `{}`",
                    category
                )));
            }
            skills.0.insert(category, list);
        }
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert!(!profile.personal_info.name.is_empty());
        assert!(!profile.projects.is_empty());
        assert!(profile.skills.contains("Programming"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map = SkillMap::new();
        map.insert("Programming", skills(&["Rust"]));
        map.insert("Tools", skills(&["Git"]));
        let previous = map.insert("Programming", skills(&["Python"]));

        assert_eq!(previous, Some(skills(&["Rust"])));
        assert_eq!(map.categories().collect::<Vec<_>>(), ["Programming", "Tools"]);
        assert_eq!(map.get("Programming"), Some(&skills(&["Python"])[..]));
    }

    #[test]
    fn reordered_puts_priority_first() {
        let map: SkillMap = [
            ("Programming", skills(&["Python"])),
            ("Data Analysis", skills(&["SQL"])),
            ("Tools & Technologies", skills(&["Git"])),
            ("Other", skills(&["Web Scraping"])),
        ]
        .into_iter()
        .collect();

        let ordered = map.reordered(&["Data Analysis", "Programming", "Databases", "Other"]);
        assert_eq!(
            ordered.categories().collect::<Vec<_>>(),
            ["Data Analysis", "Programming", "Other", "Tools & Technologies"]
        );
        assert_eq!(ordered.get("Other"), map.get("Other"));
        // Source untouched
        assert_eq!(map.categories().next(), Some("Programming"));
    }

    #[test]
    fn skill_order_survives_json() {
        let json = r#"{"Zeta": ["z"], "Alpha": ["a"], "Mid": []}"#;
        let map: SkillMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.categories().collect::<Vec<_>>(), ["Zeta", "Alpha", "Mid"]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"Zeta":["z"],"Alpha":["a"],"Mid":[]}"#
        );
    }

    #[test]
    fn duplicate_category_rejected() {
        let json = r#"{"Tools": ["git"], "Tools": ["vim"]}"#;
        let err = serde_json::from_str::<SkillMap>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate skill category"));
    }

    #[test]
    fn equality_depends_on_order() {
        let forward: SkillMap = [("A", skills(&["a"])), ("B", skills(&["b"]))]
            .into_iter()
            .collect();
        let backward = forward.reordered(&["B"]);
        assert_ne!(forward, backward);
        assert_eq!(forward, backward.reordered(&["A"]));
    }

    #[test]
    fn relevance_text_joins_fields() {
        let project = Project {
            name: "Scraper".to_string(),
            description: "Wiki analysis".to_string(),
            technologies: skills(&["Pandas", "BeautifulSoup"]),
            achievements: vec![],
        };
        assert_eq!(project.relevance_text(), "Scraper Wiki analysis Pandas BeautifulSoup");
    }
}
