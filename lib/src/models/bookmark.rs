use super::ALL_CATEGORY;
use serde::{Deserialize, Deserializer, Serialize};

/// A bookmark card as stored in the document and exchanged over the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Id of the owning category; unknown ids are tolerated
    #[serde(default = "default_category", deserialize_with = "null_as_all")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn default_category() -> String {
    ALL_CATEGORY.to_string()
}

/// Hand-edited files write `null` for empty fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_all<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

impl Bookmark {
    /// Create a new Bookmark without an icon override
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            description: description.into(),
            category: category.into(),
            tags,
            icon: None,
        }
    }

    /// Case-insensitive substring match against title, description or any tag.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }

    /// True when the bookmark is visible under the given category filter
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORY || self.category == category
    }
}
