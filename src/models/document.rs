use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The whole data file: one profile plus the ordered project list.
/// Immutable once loaded; renderers only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "aboutMe", deserialize_with = "object_or_default")]
    pub profile: Profile,
    #[serde(deserialize_with = "list_or_empty")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "text")]
    pub headshot: Option<String>,
    #[serde(deserialize_with = "object_or_default")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "text")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "text")]
    pub desc: Option<String>,
    #[serde(deserialize_with = "text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "text")]
    pub repo: Option<String>,
    #[serde(deserialize_with = "text")]
    pub demo: Option<String>,
}

impl Document {
    /// Parse the data file. Only malformed JSON is an error; wrong shapes
    /// inside a well-formed document degrade field by field.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Project shown in the spotlight before anything is selected.
    pub fn first_project(&self) -> Option<&Project> {
        self.projects.first()
    }
}

// ── Lenient field readers ─────────────────────────────

/// Non-empty strings are kept, numbers and booleans keep their display
/// text, everything else (null, "", arrays, objects) is absent.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_object(value))
}

fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(from_object).collect()),
        _ => Ok(Vec::new()),
    }
}

fn from_object<T>(value: Value) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let raw = r#"{
            "aboutMe": {
                "name": "Jane Doe",
                "role": "Engineer",
                "bio": "Builds things.",
                "headshot": "assets/img/jane.jpg",
                "links": {
                    "phone": "555-0100",
                    "email": "jane@example.com",
                    "linkedin": "https://linkedin.com/in/jane",
                    "github": "https://github.com/jane"
                }
            },
            "projects": [
                {"title": "One", "desc": "First", "image": "a.png", "repo": "https://r", "demo": "https://d"},
                {"title": "Two"}
            ]
        }"#;
        let doc = Document::from_json(raw).unwrap();
        assert_eq!(doc.profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(doc.profile.links.github.as_deref(), Some("https://github.com/jane"));
        assert_eq!(doc.projects.len(), 2);
        assert_eq!(doc.projects[0].demo.as_deref(), Some("https://d"));
        assert_eq!(doc.projects[1].desc, None);
        assert_eq!(doc.first_project().and_then(|p| p.title.as_deref()), Some("One"));
    }

    #[test]
    fn empty_object_is_empty_document() {
        let doc = Document::from_json("{}").unwrap();
        assert_eq!(doc, Document::default());
        assert!(doc.first_project().is_none());
    }

    #[test]
    fn empty_strings_and_nulls_are_absent() {
        let raw = r#"{"aboutMe": {"name": "", "role": null, "links": {"email": ""}}}"#;
        let doc = Document::from_json(raw).unwrap();
        assert_eq!(doc.profile.name, None);
        assert_eq!(doc.profile.role, None);
        assert_eq!(doc.profile.links.email, None);
    }

    #[test]
    fn wrong_shapes_degrade_per_field() {
        let raw = r#"{
            "aboutMe": {"name": 42, "bio": ["x"], "links": "nope"},
            "projects": [{"title": {"a": 1}, "desc": true}, "junk", 7]
        }"#;
        let doc = Document::from_json(raw).unwrap();
        assert_eq!(doc.profile.name.as_deref(), Some("42"));
        assert_eq!(doc.profile.bio, None);
        assert_eq!(doc.profile.links, Links::default());
        assert_eq!(doc.projects.len(), 3);
        assert_eq!(doc.projects[0].title, None);
        assert_eq!(doc.projects[0].desc.as_deref(), Some("true"));
        assert_eq!(doc.projects[1], Project::default());
    }

    #[test]
    fn non_array_projects_is_empty() {
        let doc = Document::from_json(r#"{"projects": {"title": "x"}}"#).unwrap();
        assert!(doc.projects.is_empty());
        let doc = Document::from_json(r#"{"aboutMe": null, "projects": null}"#).unwrap();
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Document::from_json("{ not json").is_err());
        assert!(Document::from_json("").is_err());
    }
}
