use serde::{Deserialize, Serialize};
use std::fmt;

/// A sidebar category; `icon` is the symbolic name of its glyph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    CategoryIcon::Circle.name().to_string()
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }

    /// Resolve the symbolic icon name, falling back to `HelpCircle`
    pub fn glyph(&self) -> CategoryIcon {
        CategoryIcon::from_name(&self.icon)
    }
}

/// Closed set of glyphs a category can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    LayoutGrid,
    Code,
    Palette,
    Cpu,
    Share2,
    Circle,
    Globe,
    Zap,
    HelpCircle,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 9] = [
        CategoryIcon::LayoutGrid,
        CategoryIcon::Code,
        CategoryIcon::Palette,
        CategoryIcon::Cpu,
        CategoryIcon::Share2,
        CategoryIcon::Circle,
        CategoryIcon::Globe,
        CategoryIcon::Zap,
        CategoryIcon::HelpCircle,
    ];

    /// Icons offered when creating a category
    pub const PICKABLE: [CategoryIcon; 6] = [
        CategoryIcon::Circle,
        CategoryIcon::Code,
        CategoryIcon::Palette,
        CategoryIcon::Cpu,
        CategoryIcon::Globe,
        CategoryIcon::Zap,
    ];

    /// Lookup by symbolic name. Unknown names map to `HelpCircle`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.name() == name)
            .unwrap_or(CategoryIcon::HelpCircle)
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryIcon::LayoutGrid => "LayoutGrid",
            CategoryIcon::Code => "Code",
            CategoryIcon::Palette => "Palette",
            CategoryIcon::Cpu => "Cpu",
            CategoryIcon::Share2 => "Share2",
            CategoryIcon::Circle => "Circle",
            CategoryIcon::Globe => "Globe",
            CategoryIcon::Zap => "Zap",
            CategoryIcon::HelpCircle => "HelpCircle",
        }
    }

    /// Terminal rendering of the glyph
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::LayoutGrid => "▦",
            CategoryIcon::Code => "</>",
            CategoryIcon::Palette => "◐",
            CategoryIcon::Cpu => "▣",
            CategoryIcon::Share2 => "⇆",
            CategoryIcon::Circle => "○",
            CategoryIcon::Globe => "◍",
            CategoryIcon::Zap => "⚡",
            CategoryIcon::HelpCircle => "?",
        }
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
