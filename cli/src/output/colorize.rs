use owo_colors::OwoColorize;
use tiosa::models::{Bookmark, Category};

pub trait Colorize {
    fn to_colored(&self) -> String;
}

/// A bookmark card plus the category it is filed under, if that category still exists
pub struct ColorizeBookmark<'a>(pub &'a Bookmark, pub Option<&'a Category>);

impl<'a> Colorize for ColorizeBookmark<'a> {
    fn to_colored(&self) -> String {
        let bookmark = self.0;
        let mut s = String::new();
        s.push_str(&format!(
            "{}. {}\n",
            bookmark.id.bright_blue(),
            bookmark.title.bold().green(),
        ));
        let padding = bookmark.id.chars().count() + 3;
        s.push_str(&format!(
            "{:>padding$} {}\n",
            ">".red(),
            bookmark.url.yellow()
        ));

        if !bookmark.description.trim().is_empty() {
            s.push_str(&format!(
                "{:>padding$} {}\n",
                "+".red(),
                bookmark.description
            ));
        }

        if !bookmark.tags.is_empty() {
            let tags_str = bookmark.tags.join(", ");
            s.push_str(&format!("{:>padding$} {}\n", "#".red(), tags_str.blue()));
        }

        let category = match self.1 {
            Some(c) => format!("{} {}", c.glyph().glyph(), c.name),
            None => bookmark.category.clone(),
        };
        s.push_str(&format!("{:>padding$} {}\n", "@".red(), category.magenta()));
        s
    }
}

/// Sidebar-style category row with its bookmark count
pub struct ColorizeCategory<'a>(pub &'a Category, pub usize);

impl<'a> Colorize for ColorizeCategory<'a> {
    fn to_colored(&self) -> String {
        let category = self.0;
        format!(
            "{} {} {} {}",
            category.glyph().glyph().cyan(),
            category.name.bold(),
            format!("({})", category.id).dimmed(),
            self.1.bright_blue()
        )
    }
}
