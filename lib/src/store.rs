use crate::error::{Result, TiosaError};
use crate::models::Document;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whole-document JSON file store.
///
/// Every read parses the full file and every write replaces it. There is no
/// locking here; callers that share a store across requests serialize access
/// themselves (see `server::AppState`).
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Get the backing file path
    pub fn get_path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file, or one that is not JSON at all, is
    /// replaced by the seed document. JSON of the wrong shape is an error and
    /// the file is left untouched.
    pub fn load(&self) -> Result<Document> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.seed("no data file"),
            Err(e) => return Err(e.into()),
        };
        let value: Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => return self.seed(&e.to_string()),
        };
        serde_json::from_value(value).map_err(|e| {
            log::error!("{:?} is JSON but not a bookmark document: {}", self.path, e);
            TiosaError::Json(format!("{}: {}", self.path.display(), e))
        })
    }

    fn seed(&self, reason: &str) -> Result<Document> {
        log::debug!("Seeding {:?}: {}", self.path, reason);
        let seed = Document::seed();
        self.save(&seed)?;
        Ok(seed)
    }

    /// Overwrite the file with the pretty-printed document
    pub fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json)?;
        log::debug!("Wrote {:?}", self.path);
        Ok(())
    }

    /// One read → mutate → write cycle. Nothing is written when `f` fails.
    pub fn update<T>(&self, f: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TiosaError;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(&dir.path().join("data.json"));
        (dir, store)
    }

    #[test]
    fn test_load_seeds_missing_file() {
        let (_dir, store) = temp_store();
        assert!(!store.get_path().exists());

        let doc = store.load().unwrap();
        assert_eq!(doc, Document::seed());
        assert!(store.get_path().exists());
    }

    #[test]
    fn test_load_seeds_unreadable_file() {
        let (_dir, store) = temp_store();
        fs::write(store.get_path(), "{ not json").unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc, Document::seed());
        let rewritten = fs::read_to_string(store.get_path()).unwrap();
        assert!(rewritten.contains("\"adminPassword\""));
    }

    #[test]
    fn test_load_keeps_file_with_null_fields() {
        let (_dir, store) = temp_store();
        let raw = r#"{
          "categories": [{"id": "all", "name": "All", "icon": "LayoutGrid"}],
          "bookmarks": [
            {"id": "a", "title": "Mine", "url": "https://mine.dev",
             "description": null, "category": null, "tags": null},
            {"id": "b", "title": "Other", "url": "https://other.dev"}
          ],
          "adminPassword": "secret"
        }"#;
        fs::write(store.get_path(), raw).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.admin_password, "secret");
        assert_eq!(doc.bookmarks.len(), 2);
        assert_eq!(doc.bookmarks[0].description, "");
        assert_eq!(doc.bookmarks[0].category, "all");
        assert!(doc.bookmarks[0].tags.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_error_and_not_overwritten() {
        let (_dir, store) = temp_store();
        let raw = r#"{"categories": "oops", "bookmarks": [], "adminPassword": "secret"}"#;
        fs::write(store.get_path(), raw).unwrap();

        assert!(matches!(store.load(), Err(TiosaError::Json(_))));
        assert_eq!(fs::read_to_string(store.get_path()).unwrap(), raw);
    }

    #[test]
    fn test_update_on_wrong_shape_does_not_write() {
        let (_dir, store) = temp_store();
        let raw = r#"{"bookmarks": [{"id": "1"}], "adminPassword": "secret"}"#;
        fs::write(store.get_path(), raw).unwrap();

        let result = store.update(|doc| {
            doc.bookmarks.clear();
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(store.get_path()).unwrap(), raw);
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = temp_store();
        let mut doc = Document::seed();
        doc.admin_password = "hunter2".into();
        doc.bookmarks.truncate(1);

        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let (_dir, store) = temp_store();
        store.save(&Document::seed()).unwrap();
        let raw = fs::read_to_string(store.get_path()).unwrap();
        assert!(raw.starts_with("{\n  \"categories\""));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(&dir.path().join("nested/deeper/data.json"));
        store.save(&Document::seed()).unwrap();
        assert!(store.get_path().exists());
    }

    #[test]
    fn test_update_failure_does_not_write() {
        let (_dir, store) = temp_store();
        store.load().unwrap();

        let result: Result<()> = store.update(|doc| {
            doc.admin_password = "changed".into();
            Err(TiosaError::BadRequest("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.load().unwrap().admin_password, "admin");
    }

    #[test]
    fn test_update_persists() {
        let (_dir, store) = temp_store();
        let count = store
            .update(|doc| {
                doc.bookmarks.clear();
                Ok(doc.bookmarks.len())
            })
            .unwrap();
        assert_eq!(count, 0);
        assert!(store.load().unwrap().bookmarks.is_empty());
    }
}
