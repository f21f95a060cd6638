//! Document mutations shared by the HTTP handlers and the local store backend.
//!
//! Each function edits a loaded [`Document`] in place and never touches
//! storage; a returned error means the document was left unchanged.

use crate::error::{Result, TiosaError};
use crate::models::{Bookmark, Category, Document, ALL_CATEGORY};
use crate::utils;
use serde_json::Value;

pub const ERR_NOT_FOUND: &str = "Not found";
pub const ERR_ADD_ALL: &str = "Cannot add all category";
pub const ERR_CATEGORY_EXISTS: &str = "Category exists";
pub const ERR_DELETE_ALL: &str = "Cannot delete all category";
pub const ERR_INVALID_PASSWORD: &str = "Invalid password";
pub const ERR_INVALID_IMPORT: &str = "Invalid import payload";

/// Replace the bookmark with the same id in place, or prepend it when the id is new.
/// An empty id is replaced by a timestamp-derived one.
pub fn upsert_bookmark(doc: &mut Document, mut bookmark: Bookmark) {
    if bookmark.id.is_empty() {
        bookmark.id = utils::generate_id();
    }
    match doc.bookmarks.iter_mut().find(|b| b.id == bookmark.id) {
        Some(existing) => *existing = bookmark,
        None => doc.bookmarks.insert(0, bookmark),
    }
}

/// Replace the bookmark stored under `id`. The stored id is kept even if the body differs.
pub fn replace_bookmark(doc: &mut Document, id: &str, mut bookmark: Bookmark) -> Result<()> {
    let existing = doc
        .bookmarks
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| TiosaError::NotFound(ERR_NOT_FOUND.into()))?;
    bookmark.id = id.to_string();
    *existing = bookmark;
    Ok(())
}

/// Remove by id. Returns whether anything was removed; an unknown id is not an error.
pub fn delete_bookmark(doc: &mut Document, id: &str) -> bool {
    let before = doc.bookmarks.len();
    doc.bookmarks.retain(|b| b.id != id);
    doc.bookmarks.len() != before
}

/// Append a category. An empty id is derived from the name.
pub fn add_category(doc: &mut Document, mut category: Category) -> Result<()> {
    if category.id.is_empty() {
        category.id = utils::slugify(&category.name);
    }
    if category.id == ALL_CATEGORY {
        return Err(TiosaError::BadRequest(ERR_ADD_ALL.into()));
    }
    if doc.category(&category.id).is_some() {
        return Err(TiosaError::Conflict(ERR_CATEGORY_EXISTS.into()));
    }
    doc.categories.push(category);
    Ok(())
}

/// Remove a category and move its bookmarks to `all`
pub fn delete_category(doc: &mut Document, id: &str) -> Result<()> {
    if id == ALL_CATEGORY {
        return Err(TiosaError::BadRequest(ERR_DELETE_ALL.into()));
    }
    doc.categories.retain(|c| c.id != id);
    for bookmark in doc.bookmarks.iter_mut().filter(|b| b.category == id) {
        bookmark.category = ALL_CATEGORY.to_string();
    }
    Ok(())
}

/// Extract `password` from a `{password}` body; it must be a non-empty string
pub fn password_from_body(body: &Value) -> Result<String> {
    match body.get("password") {
        Some(Value::String(p)) if !p.is_empty() => Ok(p.clone()),
        _ => Err(TiosaError::BadRequest(ERR_INVALID_PASSWORD.into())),
    }
}

pub fn set_password(doc: &mut Document, password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(TiosaError::BadRequest(ERR_INVALID_PASSWORD.into()));
    }
    doc.admin_password = password.to_string();
    Ok(())
}

/// Turn an import payload into a document. `bookmarks`, `categories` and a
/// non-empty `adminPassword` must all be present.
pub fn validate_import(payload: Value) -> Result<Document> {
    let invalid = || TiosaError::BadRequest(ERR_INVALID_IMPORT.into());

    let present = |key: &str| payload.get(key).is_some_and(|v| !v.is_null());
    let password_ok = matches!(payload.get("adminPassword"), Some(Value::String(p)) if !p.is_empty());
    if !present("bookmarks") || !present("categories") || !password_ok {
        return Err(invalid());
    }

    serde_json::from_value(payload).map_err(|e| {
        log::debug!("Import payload rejected: {}", e);
        invalid()
    })
}
