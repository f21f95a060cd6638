use crate::format::traits::BookmarkFormat;
use tiosa::models::{Bookmark, Category};

pub struct JsonBookmarks<'a>(pub &'a [&'a Bookmark]);

impl<'a> BookmarkFormat for JsonBookmarks<'a> {
    fn to_string(&self) -> String {
        serde_json::to_string_pretty(self.0).unwrap_or_default()
    }
}

pub struct JsonCategories<'a>(pub &'a [Category]);

impl<'a> BookmarkFormat for JsonCategories<'a> {
    fn to_string(&self) -> String {
        serde_json::to_string_pretty(self.0).unwrap_or_default()
    }
}
