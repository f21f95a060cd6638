use crate::format::traits::BookmarkFormat;
use tiosa::models::{Bookmark, Category};

pub struct YamlBookmarks<'a>(pub &'a [&'a Bookmark]);

impl<'a> BookmarkFormat for YamlBookmarks<'a> {
    fn to_string(&self) -> String {
        serde_yaml::to_string(self.0).unwrap_or_default()
    }
}

pub struct YamlCategories<'a>(pub &'a [Category]);

impl<'a> BookmarkFormat for YamlCategories<'a> {
    fn to_string(&self) -> String {
        serde_yaml::to_string(self.0).unwrap_or_default()
    }
}
