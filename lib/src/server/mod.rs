//! JSON API over the document store.

pub mod error;
pub mod extract;
pub mod handlers;

use crate::config::ServerConfig;
use crate::error::{Result, TiosaError};
use crate::store::JsonStore;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Shared handler state: the single store handle, one request at a time
#[derive(Clone)]
pub struct AppState(Arc<Mutex<JsonStore>>);

impl AppState {
    pub fn new(store: JsonStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Run `f` while holding exclusive access to the store
    pub fn with_store<T>(&self, f: impl FnOnce(&JsonStore) -> Result<T>) -> Result<T> {
        let store = self
            .0
            .lock()
            .map_err(|_| TiosaError::Other("store lock poisoned".into()))?;
        f(&store)
    }

    /// [`AppState::with_store`] on the blocking pool, keeping file I/O off
    /// the async workers
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&JsonStore) -> Result<T> + Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || state.with_store(f))
            .await
            .map_err(|e| TiosaError::Other(format!("store task failed: {}", e)))?
    }
}

pub fn create_router(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/state", get(handlers::get_state))
        .route("/api/bookmarks", post(handlers::save_bookmark))
        .route(
            "/api/bookmarks/{id}",
            put(handlers::replace_bookmark).delete(handlers::delete_bookmark),
        )
        .route("/api/categories", post(handlers::add_category))
        .route("/api/categories/{id}", delete(handlers::delete_category))
        .route("/api/password", put(handlers::update_password))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let store = JsonStore::open(&config.data_file);
    let app = create_router(AppState::new(store), config.body_limit);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    log::info!("Server listening on http://{}", listener.local_addr()?);
    log::info!("Data file: {}", config.data_file.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestServer {
        _dir: TempDir,
        store: JsonStore,
        app: Router,
    }

    impl TestServer {
        fn new() -> Self {
            Self::with_limit(1024 * 1024)
        }

        fn with_limit(body_limit: usize) -> Self {
            let dir = TempDir::new().expect("temp dir should be created");
            let store = JsonStore::open(&dir.path().join("data.json"));
            let app = create_router(AppState::new(store.clone()), body_limit);
            Self {
                _dir: dir,
                store,
                app,
            }
        }

        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            self.send_raw(method, uri, body.map(|b| b.to_string())).await
        }

        async fn send_raw(
            &self,
            method: &str,
            uri: &str,
            body: Option<String>,
        ) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body)),
                None => builder.body(Body::empty()),
            }
            .expect("request");

            let response = self.app.clone().oneshot(request).await.expect("response");
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("body bytes");
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }
    }

    fn ids(list: &Value) -> Vec<String> {
        list.as_array()
            .expect("array")
            .iter()
            .map(|v| v["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn get_state_seeds_first_run() {
        let server = TestServer::new();
        let (status, body) = server.send("GET", "/api/state", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["adminPassword"], "admin");
        assert_eq!(ids(&body["bookmarks"]), vec!["1", "2", "3", "4"]);
        assert!(server.store.get_path().exists());
    }

    #[tokio::test]
    async fn post_bookmark_prepends_new_and_replaces_existing() {
        let server = TestServer::new();
        let new = json!({
            "id": "42", "title": "Rust", "url": "https://rust-lang.org",
            "description": "", "category": "dev", "tags": ["lang"]
        });
        let (status, body) = server.send("POST", "/api/bookmarks", Some(new)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["bookmarks"]), vec!["42", "1", "2", "3", "4"]);

        let edited = json!({
            "id": "2", "title": "Figma v2", "url": "https://figma.com",
            "description": "", "category": "design", "tags": []
        });
        let (_, body) = server.send("POST", "/api/bookmarks", Some(edited)).await;
        assert_eq!(ids(&body["bookmarks"]), vec!["42", "1", "2", "3", "4"]);
        assert_eq!(body["bookmarks"][2]["title"], "Figma v2");
    }

    #[tokio::test]
    async fn put_bookmark_requires_existing_id() {
        let server = TestServer::new();
        let body = json!({ "id": "77", "title": "x", "url": "https://x.io" });

        let (status, err) = server
            .send("PUT", "/api/bookmarks/77", Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "Not found");

        let (status, ok) = server.send("PUT", "/api/bookmarks/1", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ok["bookmarks"][0]["id"], "1");
        assert_eq!(ok["bookmarks"][0]["title"], "x");
    }

    #[tokio::test]
    async fn delete_bookmark_is_idempotent() {
        let server = TestServer::new();
        let (status, body) = server.send("DELETE", "/api/bookmarks/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["bookmarks"]), vec!["1", "2", "4"]);

        let (status, body) = server.send("DELETE", "/api/bookmarks/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["bookmarks"]), vec!["1", "2", "4"]);
    }

    #[tokio::test]
    async fn post_category_rules() {
        let server = TestServer::new();

        let (status, err) = server
            .send("POST", "/api/categories", Some(json!({"id": "all", "name": "All", "icon": "Zap"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Cannot add all category");

        let (status, err) = server
            .send("POST", "/api/categories", Some(json!({"id": "dev", "name": "Dev", "icon": "Code"})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["error"], "Category exists");
        assert_eq!(server.store.load().unwrap().categories.len(), 5);

        let (status, body) = server
            .send("POST", "/api/categories", Some(json!({"id": "news", "name": "News", "icon": "Globe"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            ids(&body["categories"]),
            vec!["all", "dev", "design", "ai", "social", "news"]
        );
    }

    #[tokio::test]
    async fn delete_category_cascades_to_all() {
        let server = TestServer::new();

        let (status, _) = server.send("DELETE", "/api/categories/all", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = server.send("DELETE", "/api/categories/design", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["categories"]), vec!["all", "dev", "ai", "social"]);
        let categories: Vec<&str> = body["bookmarks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["dev", "all", "ai", "all"]);
    }

    #[tokio::test]
    async fn put_password_validates_body() {
        let server = TestServer::new();

        for bad in [json!({}), json!({"password": 7}), json!({"password": ""})] {
            let (status, err) = server.send("PUT", "/api/password", Some(bad)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(err["error"], "Invalid password");
        }

        let (status, body) = server
            .send("PUT", "/api/password", Some(json!({"password": "n3w"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"adminPassword": "n3w"}));
        assert_eq!(server.store.load().unwrap().admin_password, "n3w");
    }

    #[tokio::test]
    async fn import_replaces_document_or_leaves_it_alone() {
        let server = TestServer::new();
        server.send("GET", "/api/state", None).await;

        let incomplete = json!({"categories": [], "bookmarks": []});
        let (status, err) = server.send("POST", "/api/import", Some(incomplete)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Invalid import payload");
        assert_eq!(server.store.load().unwrap(), Document::seed());

        let complete = json!({
            "categories": [{"id": "all", "name": "All", "icon": "LayoutGrid"}],
            "bookmarks": [{"id": "9", "title": "Only", "url": "https://only.dev",
                           "description": "", "category": "all", "tags": []}],
            "adminPassword": "imported"
        });
        let (status, body) = server.send("POST", "/api/import", Some(complete.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, complete);

        let (_, exported) = server.send("GET", "/api/export", None).await;
        assert_eq!(exported, complete);
    }

    #[tokio::test]
    async fn malformed_bodies_get_error_json() {
        let server = TestServer::new();
        server.send("GET", "/api/state", None).await;

        let cases = [
            ("POST", "/api/bookmarks", r#"{"id":"9","url":"https://x.io"}"#),
            ("POST", "/api/bookmarks", "not json"),
            ("PUT", "/api/bookmarks/1", r#"{"title": 5}"#),
            ("POST", "/api/categories", r#"{"id":"x"}"#),
            ("PUT", "/api/password", "{"),
            ("POST", "/api/import", "[1, 2"),
        ];
        for (method, uri, body) in cases {
            let (status, err) = server.send_raw(method, uri, Some(body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert_eq!(err["error"], extract::ERR_INVALID_BODY, "{} {}", method, uri);
        }
        assert_eq!(server.store.load().unwrap(), Document::seed());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let server = TestServer::with_limit(64);
        server.send("GET", "/api/state", None).await;

        let big = json!({
            "id": "big", "title": "x".repeat(200), "url": "https://big.io"
        });
        let (status, err) = server.send("POST", "/api/bookmarks", Some(big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err["error"], extract::ERR_BODY_TOO_LARGE);
        assert_eq!(server.store.load().unwrap(), Document::seed());
    }

    #[tokio::test]
    async fn concurrent_saves_all_land() {
        let server = TestServer::new();
        server.send("GET", "/api/state", None).await;

        let mut tasks = Vec::new();
        for i in 0..8 {
            let body = json!({ "id": format!("c{}", i), "title": "t", "url": "https://c.io" });
            let request = Request::builder()
                .method("POST")
                .uri("/api/bookmarks")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request");
            tasks.push(tokio::spawn(server.app.clone().oneshot(request)));
        }
        for task in tasks {
            let response = task.await.expect("join").expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(server.store.load().unwrap().bookmarks.len(), 12);
    }

    #[tokio::test]
    async fn cors_reflects_origin() {
        let server = TestServer::new();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/bookmarks")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .expect("request");

        let response = server.app.clone().oneshot(request).await.expect("response");
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
    }
}
