pub mod bookmark;
pub mod category;
pub mod document;

pub use bookmark::Bookmark;
pub use category::{Category, CategoryIcon};
pub use document::{
    BookmarksPayload, CategoriesPayload, CategoryDeletePayload, Document, PasswordPayload,
    PasswordUpdate, WebsiteMetadata,
};

/// Reserved category id meaning "no filter"; always present, never deletable
pub const ALL_CATEGORY: &str = "all";
