use super::Backend;
use crate::error::Result;
use crate::models::{
    Bookmark, BookmarksPayload, CategoriesPayload, Category, CategoryDeletePayload, Document,
    PasswordPayload,
};
use crate::operations;
use crate::store::JsonStore;
use serde_json::Value;

/// Talks to a local data file directly, applying the same operations the server does
pub struct StoreBackend {
    store: JsonStore,
}

impl StoreBackend {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }
}

impl Backend for StoreBackend {
    fn get_state(&self) -> Result<Document> {
        self.store.load()
    }

    fn save_bookmark(&self, bookmark: &Bookmark) -> Result<BookmarksPayload> {
        let bookmarks = self.store.update(|doc| {
            operations::upsert_bookmark(doc, bookmark.clone());
            Ok(doc.bookmarks.clone())
        })?;
        Ok(BookmarksPayload { bookmarks })
    }

    fn delete_bookmark(&self, id: &str) -> Result<BookmarksPayload> {
        let bookmarks = self.store.update(|doc| {
            operations::delete_bookmark(doc, id);
            Ok(doc.bookmarks.clone())
        })?;
        Ok(BookmarksPayload { bookmarks })
    }

    fn add_category(&self, category: &Category) -> Result<CategoriesPayload> {
        let categories = self.store.update(|doc| {
            operations::add_category(doc, category.clone())?;
            Ok(doc.categories.clone())
        })?;
        Ok(CategoriesPayload { categories })
    }

    fn delete_category(&self, id: &str) -> Result<CategoryDeletePayload> {
        let (categories, bookmarks) = self.store.update(|doc| {
            operations::delete_category(doc, id)?;
            Ok((doc.categories.clone(), doc.bookmarks.clone()))
        })?;
        Ok(CategoryDeletePayload {
            categories,
            bookmarks,
        })
    }

    fn update_password(&self, password: &str) -> Result<PasswordPayload> {
        let admin_password = self.store.update(|doc| {
            operations::set_password(doc, password)?;
            Ok(doc.admin_password.clone())
        })?;
        Ok(PasswordPayload { admin_password })
    }

    fn export(&self) -> Result<Document> {
        self.store.load()
    }

    fn import(&self, payload: &Value) -> Result<Document> {
        let doc = operations::validate_import(payload.clone())?;
        self.store.save(&doc)?;
        Ok(doc)
    }
}
