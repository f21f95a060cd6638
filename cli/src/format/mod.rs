use crate::{
    format::{
        json::{JsonBookmarks, JsonCategories},
        plain::{PlainBookmark, PlainCategory},
        traits::BookmarkFormat,
        yaml::{YamlBookmarks, YamlCategories},
    },
    output::colorize::{Colorize, ColorizeBookmark, ColorizeCategory},
};
use tiosa::models::{Bookmark, Category};

pub mod json;
pub mod plain;
pub mod traits;
pub mod yaml;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Plain,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            "plain" | "text" => OutputFormat::Plain,
            _ => OutputFormat::Colored,
        }
    }

    pub fn render_bookmarks(
        self,
        records: &[&Bookmark],
        categories: &[Category],
        no_color: bool,
    ) -> String {
        let category_of = |b: &Bookmark| categories.iter().find(|c| c.id == b.category);
        match self {
            OutputFormat::Json => JsonBookmarks(records).to_string(),
            OutputFormat::Yaml => YamlBookmarks(records).to_string(),
            OutputFormat::Plain => records
                .iter()
                .map(|&b| PlainBookmark(b, category_of(b)).to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Colored if no_color => {
                OutputFormat::Plain.render_bookmarks(records, categories, no_color)
            }
            OutputFormat::Colored => records
                .iter()
                .map(|&b| ColorizeBookmark(b, category_of(b)).to_colored())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn print_bookmarks(self, records: &[&Bookmark], categories: &[Category], no_color: bool) {
        if records.is_empty() && matches!(self, OutputFormat::Plain | OutputFormat::Colored) {
            eprintln!("No bookmarks found");
            return;
        }
        print!("{}", self.render_bookmarks(records, categories, no_color));
        if matches!(self, OutputFormat::Json) {
            println!();
        }
    }

    /// Category listing with per-category bookmark counts ("all" counts everything)
    pub fn render_categories(
        self,
        categories: &[Category],
        bookmarks: &[Bookmark],
        no_color: bool,
    ) -> String {
        let count = |c: &Category| bookmarks.iter().filter(|b| b.in_category(&c.id)).count();
        match self {
            OutputFormat::Json => JsonCategories(categories).to_string(),
            OutputFormat::Yaml => YamlCategories(categories).to_string(),
            OutputFormat::Colored if !no_color => categories
                .iter()
                .map(|c| ColorizeCategory(c, count(c)).to_colored())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => categories
                .iter()
                .map(|c| PlainCategory(c, count(c)).to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn print_categories(self, categories: &[Category], bookmarks: &[Bookmark], no_color: bool) {
        println!("{}", self.render_categories(categories, bookmarks, no_color));
    }
}
