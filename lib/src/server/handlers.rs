//! HTTP route handlers. Each one loads the whole document, applies one
//! operation and writes the document back before answering with the
//! affected slice. Store access runs on the blocking pool.

use super::error::ApiError;
use super::extract::ApiJson;
use super::AppState;
use crate::models::{
    Bookmark, BookmarksPayload, CategoriesPayload, Category, CategoryDeletePayload, Document,
    PasswordPayload,
};
use crate::operations;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn get_state(State(state): State<AppState>) -> ApiResult<Document> {
    let doc = state.run(|store| store.load()).await?;
    Ok(Json(doc))
}

pub async fn save_bookmark(
    State(state): State<AppState>,
    ApiJson(bookmark): ApiJson<Bookmark>,
) -> ApiResult<BookmarksPayload> {
    log::info!("Saving bookmark {:?} ({})", bookmark.id, bookmark.url);
    let bookmarks = state
        .run(move |store| {
            store.update(|doc| {
                operations::upsert_bookmark(doc, bookmark);
                Ok(doc.bookmarks.clone())
            })
        })
        .await?;
    Ok(Json(BookmarksPayload { bookmarks }))
}

pub async fn replace_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(bookmark): ApiJson<Bookmark>,
) -> ApiResult<BookmarksPayload> {
    let bookmarks = state
        .run(move |store| {
            store.update(|doc| {
                operations::replace_bookmark(doc, &id, bookmark)?;
                Ok(doc.bookmarks.clone())
            })
        })
        .await?;
    Ok(Json(BookmarksPayload { bookmarks }))
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BookmarksPayload> {
    let bookmarks = state
        .run(move |store| {
            store.update(|doc| {
                if !operations::delete_bookmark(doc, &id) {
                    log::debug!("Delete of unknown bookmark {:?} ignored", id);
                }
                Ok(doc.bookmarks.clone())
            })
        })
        .await?;
    Ok(Json(BookmarksPayload { bookmarks }))
}

pub async fn add_category(
    State(state): State<AppState>,
    ApiJson(category): ApiJson<Category>,
) -> ApiResult<CategoriesPayload> {
    let categories = state
        .run(move |store| {
            store.update(|doc| {
                operations::add_category(doc, category)?;
                Ok(doc.categories.clone())
            })
        })
        .await?;
    Ok(Json(CategoriesPayload { categories }))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CategoryDeletePayload> {
    let (categories, bookmarks) = state
        .run(move |store| {
            store.update(|doc| {
                operations::delete_category(doc, &id)?;
                Ok((doc.categories.clone(), doc.bookmarks.clone()))
            })
        })
        .await?;
    Ok(Json(CategoryDeletePayload {
        categories,
        bookmarks,
    }))
}

pub async fn update_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<PasswordPayload> {
    let password = operations::password_from_body(&body)?;
    let admin_password = state
        .run(move |store| {
            store.update(|doc| {
                operations::set_password(doc, &password)?;
                Ok(doc.admin_password.clone())
            })
        })
        .await?;
    Ok(Json(PasswordPayload { admin_password }))
}

pub async fn export(State(state): State<AppState>) -> ApiResult<Document> {
    let doc = state.run(|store| store.load()).await?;
    Ok(Json(doc))
}

/// Replace the whole document in a single write
pub async fn import(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<Document> {
    let doc = operations::validate_import(payload)?;
    let doc = state
        .run(move |store| {
            store.save(&doc)?;
            Ok(doc)
        })
        .await?;
    log::info!(
        "Imported {} bookmark(s), {} categories",
        doc.bookmarks.len(),
        doc.categories.len()
    );
    Ok(Json(doc))
}
