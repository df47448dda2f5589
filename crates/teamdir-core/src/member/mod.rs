//! Member records and identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Name used when a record carries no usable name.
pub const UNKNOWN_MEMBER: &str = "Unknown Member";
/// Role used when a record carries no usable role.
pub const DEFAULT_ROLE: &str = "General";
/// Id used when a name slugs to nothing.
const FALLBACK_ID: &str = "member";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an id from a display name: lowercased, whitespace runs become
    /// a single hyphen, and anything outside `[a-z0-9-]` is dropped.
    pub fn from_name(name: &str) -> Self {
        let slug = slugify(name);
        if slug.is_empty() {
            Self(FALLBACK_ID.to_string())
        } else {
            Self(slug)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

/// A team member as shown in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub stream: String,
    pub news_type: String,
    pub news_about: String,
    pub photo: String,
    /// Fields the directory does not interpret, kept for round-tripping.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: MemberId::from_name(&name),
            name,
            class_name: String::new(),
            stream: String::new(),
            news_type: DEFAULT_ROLE.to_string(),
            news_about: String::new(),
            photo: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = MemberId::new(id);
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    pub fn with_role(mut self, news_type: impl Into<String>) -> Self {
        self.news_type = news_type.into();
        self
    }

    pub fn with_about(mut self, news_about: impl Into<String>) -> Self {
        self.news_about = news_about.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = photo.into();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl From<RawMember> for Member {
    fn from(raw: RawMember) -> Self {
        let name = present(raw.name).unwrap_or_else(|| UNKNOWN_MEMBER.to_string());
        let id = present(raw.id).map_or_else(|| MemberId::from_name(&name), MemberId::new);
        Self {
            id,
            name,
            class_name: present(raw.class_name).unwrap_or_default(),
            stream: present(raw.stream).unwrap_or_default(),
            news_type: present(raw.news_type).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            news_about: present(raw.news_about).unwrap_or_default(),
            photo: present(raw.photo).unwrap_or_default(),
            extra: raw.extra,
        }
    }
}

/// A member record as it appears in a roster document, before defaults.
///
/// String fields accept numbers and booleans (stringified); any other JSON
/// type is read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, rename = "class", deserialize_with = "lenient_string")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stream: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub news_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub news_about: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub photo: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
