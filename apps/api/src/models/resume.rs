use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// The five top-level sections of `data/data.json`.
/// Each is parsed on its own so one malformed section cannot blank the page.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub profile: SectionData<Profile>,
    pub projects: SectionData<Vec<Project>>,
    pub experiences: SectionData<Vec<Experience>>,
    pub education: SectionData<Vec<Education>>,
    pub skills: SectionData<Vec<SkillCategory>>,
}

/// Outcome of reading one top-level key of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData<T> {
    Loaded(T),
    /// Key absent or `null`.
    Missing,
    /// Key present but does not match the expected shape.
    Malformed(String),
}

impl<T: DeserializeOwned> SectionData<T> {
    pub fn from_field(root: &Map<String, Value>, key: &str) -> Self {
        match root.get(key) {
            None | Some(Value::Null) => SectionData::Missing,
            Some(value) => match T::deserialize(value) {
                Ok(parsed) => SectionData::Loaded(parsed),
                Err(e) => SectionData::Malformed(format!("'{key}': {e}")),
            },
        }
    }
}

impl<T> SectionData<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            SectionData::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl ResumeDocument {
    pub fn from_object(root: &Map<String, Value>) -> Self {
        ResumeDocument {
            profile: SectionData::from_field(root, "profile"),
            projects: SectionData::from_field(root, "projects"),
            experiences: SectionData::from_field(root, "experiences"),
            education: SectionData::from_field(root, "education"),
            skills: SectionData::from_field(root, "skills"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub key_info: Vec<KeyInfoItem>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInfoItem {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

impl Project {
    /// The repository URL when it is a non-empty string.
    pub fn repo_link(&self) -> Option<&str> {
        self.repo_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub date: String,
    #[serde(default)]
    pub responsibilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}
