use crate::format::traits::BookmarkFormat;
use tiosa::models::{Bookmark, Category};

/// Uncolored card layout for `--nc` and non-terminal output
pub struct PlainBookmark<'a>(pub &'a Bookmark, pub Option<&'a Category>);

impl<'a> BookmarkFormat for PlainBookmark<'a> {
    fn to_string(&self) -> String {
        let bookmark = self.0;
        let padding = bookmark.id.chars().count() + 3;
        let mut s = format!("{}. {}\n", bookmark.id, bookmark.title);
        s.push_str(&format!("{:>padding$} {}\n", ">", bookmark.url));
        if !bookmark.description.trim().is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "+", bookmark.description));
        }
        if !bookmark.tags.is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "#", bookmark.tags.join(", ")));
        }
        let category = self.1.map(|c| c.name.as_str()).unwrap_or(&bookmark.category);
        s.push_str(&format!("{:>padding$} {}\n", "@", category));
        s
    }
}

pub struct PlainCategory<'a>(pub &'a Category, pub usize);

impl<'a> BookmarkFormat for PlainCategory<'a> {
    fn to_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.0.id, self.0.name, self.0.icon, self.1)
    }
}
