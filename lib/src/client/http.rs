use super::Backend;
use crate::error::{Result, TiosaError};
use crate::models::{
    Bookmark, BookmarksPayload, CategoriesPayload, Category, CategoryDeletePayload, Document,
    PasswordPayload, PasswordUpdate,
};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Blocking client for the `/api` routes
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// `base` is the API root, e.g. `http://localhost:3001/api`
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base.trim_end_matches('/'))
            .map_err(|e| TiosaError::Config(format!("invalid API base {:?}: {}", base, e)))?;
        if base.cannot_be_a_base() {
            return Err(TiosaError::Config(format!("invalid API base {:?}", base.as_str())));
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    /// Join path segments onto the base, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body: Value = resp.json().unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
                .to_string();
            return Err(TiosaError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json()?)
    }
}

impl Backend for ApiClient {
    fn get_state(&self) -> Result<Document> {
        self.send(self.request(Method::GET, &["state"]))
    }

    fn save_bookmark(&self, bookmark: &Bookmark) -> Result<BookmarksPayload> {
        self.send(self.request(Method::POST, &["bookmarks"]).json(bookmark))
    }

    fn delete_bookmark(&self, id: &str) -> Result<BookmarksPayload> {
        self.send(self.request(Method::DELETE, &["bookmarks", id]))
    }

    fn add_category(&self, category: &Category) -> Result<CategoriesPayload> {
        self.send(self.request(Method::POST, &["categories"]).json(category))
    }

    fn delete_category(&self, id: &str) -> Result<CategoryDeletePayload> {
        self.send(self.request(Method::DELETE, &["categories", id]))
    }

    fn update_password(&self, password: &str) -> Result<PasswordPayload> {
        let body = PasswordUpdate {
            password: password.to_string(),
        };
        self.send(self.request(Method::PUT, &["password"]).json(&body))
    }

    fn export(&self) -> Result<Document> {
        self.send(self.request(Method::GET, &["export"]))
    }

    fn import(&self, payload: &Value) -> Result<Document> {
        self.send(self.request(Method::POST, &["import"]).json(payload))
    }
}
