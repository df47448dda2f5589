//! Filter criteria

use serde::{Deserialize, Serialize};

/// The three filter dimensions, combined with logical AND.
///
/// An empty string means "no constraint" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text search over name, role, stream, and bio
    #[serde(default)]
    pub search: String,
    /// Stream, matched case-insensitively in full
    #[serde(default)]
    pub stream: String,
    /// Role, matched as a case-insensitive substring
    #[serde(default)]
    pub news_type: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    pub fn with_news_type(mut self, news_type: impl Into<String>) -> Self {
        self.news_type = news_type.into();
        self
    }

    /// Whether any dimension constrains the result
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.stream.is_empty() || !self.news_type.is_empty()
    }
}
