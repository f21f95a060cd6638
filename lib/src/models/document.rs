use super::{Bookmark, Category};
use serde::{Deserialize, Serialize};

/// The whole persisted state. Order of both sequences is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub categories: Vec<Category>,
    pub bookmarks: Vec<Bookmark>,
    pub admin_password: String,
}

impl Document {
    /// Compiled-in defaults used on first run and when the server is unreachable
    pub fn seed() -> Self {
        Self {
            categories: vec![
                Category::new("all", "全部链接", "LayoutGrid"),
                Category::new("dev", "开发工具", "Code"),
                Category::new("design", "设计灵感", "Palette"),
                Category::new("ai", "人工智能", "Cpu"),
                Category::new("social", "社交媒体", "Share2"),
            ],
            bookmarks: vec![
                Bookmark::new(
                    "1",
                    "GitHub",
                    "https://github.com",
                    "全球领先的软件开发和版本控制平台。",
                    "dev",
                    tags(&["编程", "开源", "社区"]),
                ),
                Bookmark::new(
                    "2",
                    "Figma",
                    "https://figma.com",
                    "跨平台的在线协作设计工具。",
                    "design",
                    tags(&["设计", "UI", "UX"]),
                ),
                Bookmark::new(
                    "3",
                    "Gemini AI",
                    "https://gemini.google.com",
                    "Google 开发的新一代多模态大模型。",
                    "ai",
                    tags(&["AI", "LLM", "谷歌"]),
                ),
                Bookmark::new(
                    "4",
                    "Dribbble",
                    "https://dribbble.com",
                    "发现全球顶尖的设计作品与创意灵感。",
                    "design",
                    tags(&["视觉", "排版", "插画"]),
                ),
            ],
            admin_password: "admin".to_string(),
        }
    }

    pub fn bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// `{bookmarks}` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarksPayload {
    pub bookmarks: Vec<Bookmark>,
}

/// `{categories}` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesPayload {
    pub categories: Vec<Category>,
}

/// `{categories, bookmarks}` response of a category delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDeletePayload {
    pub categories: Vec<Category>,
    pub bookmarks: Vec<Bookmark>,
}

/// `{adminPassword}` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPayload {
    pub admin_password: String,
}

/// `{password}` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordUpdate {
    pub password: String,
}

/// Result of an autofill lookup. Category is never part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebsiteMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
