//! Data-sync layer used by the controller. Every mutation answers with the
//! updated slice of state so the caller can replace its local copy.

pub mod http;
pub mod local;

pub use http::ApiClient;
pub use local::StoreBackend;

use crate::error::Result;
use crate::models::{
    Bookmark, BookmarksPayload, CategoriesPayload, Category, CategoryDeletePayload, Document,
    PasswordPayload,
};
use serde_json::Value;

pub trait Backend {
    fn get_state(&self) -> Result<Document>;
    fn save_bookmark(&self, bookmark: &Bookmark) -> Result<BookmarksPayload>;
    fn delete_bookmark(&self, id: &str) -> Result<BookmarksPayload>;
    fn add_category(&self, category: &Category) -> Result<CategoriesPayload>;
    fn delete_category(&self, id: &str) -> Result<CategoryDeletePayload>;
    fn update_password(&self, password: &str) -> Result<PasswordPayload>;
    fn export(&self) -> Result<Document>;
    /// Replace the whole remote document; the payload is validated remotely
    fn import(&self, payload: &Value) -> Result<Document>;
}

impl<T: Backend + ?Sized> Backend for &T {
    fn get_state(&self) -> Result<Document> {
        (**self).get_state()
    }
    fn save_bookmark(&self, bookmark: &Bookmark) -> Result<BookmarksPayload> {
        (**self).save_bookmark(bookmark)
    }
    fn delete_bookmark(&self, id: &str) -> Result<BookmarksPayload> {
        (**self).delete_bookmark(id)
    }
    fn add_category(&self, category: &Category) -> Result<CategoriesPayload> {
        (**self).add_category(category)
    }
    fn delete_category(&self, id: &str) -> Result<CategoryDeletePayload> {
        (**self).delete_category(id)
    }
    fn update_password(&self, password: &str) -> Result<PasswordPayload> {
        (**self).update_password(password)
    }
    fn export(&self) -> Result<Document> {
        (**self).export()
    }
    fn import(&self, payload: &Value) -> Result<Document> {
        (**self).import(payload)
    }
}

impl<T: Backend + ?Sized> Backend for Box<T> {
    fn get_state(&self) -> Result<Document> {
        (**self).get_state()
    }
    fn save_bookmark(&self, bookmark: &Bookmark) -> Result<BookmarksPayload> {
        (**self).save_bookmark(bookmark)
    }
    fn delete_bookmark(&self, id: &str) -> Result<BookmarksPayload> {
        (**self).delete_bookmark(id)
    }
    fn add_category(&self, category: &Category) -> Result<CategoriesPayload> {
        (**self).add_category(category)
    }
    fn delete_category(&self, id: &str) -> Result<CategoryDeletePayload> {
        (**self).delete_category(id)
    }
    fn update_password(&self, password: &str) -> Result<PasswordPayload> {
        (**self).update_password(password)
    }
    fn export(&self) -> Result<Document> {
        (**self).export()
    }
    fn import(&self, payload: &Value) -> Result<Document> {
        (**self).import(payload)
    }
}
