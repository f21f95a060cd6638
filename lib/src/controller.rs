//! Client-side session state over a [`Backend`].
//!
//! Every remote mutation follows replace-on-success: the local copy is only
//! touched once the backend has answered, and a failed call is logged and
//! leaves the previous state in place. Drag reordering is the exception; it
//! is applied locally and never sent anywhere.

use crate::client::Backend;
use crate::error::{Result, TiosaError};
use crate::import_export;
use crate::metadata::MetadataProvider;
use crate::models::{Bookmark, Category, Document, ALL_CATEGORY};
use crate::operations::ERR_DELETE_ALL;
use crate::tags::{format_tags, parse_tags};
use crate::utils;
use std::path::{Path, PathBuf};

pub const LOGIN_FAILED: &str = "authentication failed: access denied";
pub const PASSWORD_RESET: &str = "access credentials reset";
pub const EXPORT_FAILED: &str = "export failed";
pub const IMPORT_SUCCEEDED: &str = "import succeeded";
pub const IMPORT_FAILED: &str = "import failed: invalid file format";

/// Which half of the target card the dragged item was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

impl DropSide {
    /// Left of the card midpoint drops before, anything else after
    pub fn from_offset(cursor_x: f64, card_width: f64) -> Self {
        if cursor_x < card_width / 2.0 {
            DropSide::Before
        } else {
            DropSide::After
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    Bookmarks,
    #[default]
    Categories,
    Settings,
}

/// Edit-form contents. Tags are kept as the comma-separated text the user types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub tags: String,
}

impl BookmarkDraft {
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            description: bookmark.description.clone(),
            category: bookmark.category.clone(),
            tags: format_tags(&bookmark.tags),
        }
    }

    /// Build the bookmark to submit. Title and url are required.
    pub fn to_bookmark(&self, id: Option<&str>) -> Result<Bookmark> {
        let title = self.title.trim();
        let url = self.url.trim();
        if title.is_empty() || url.is_empty() {
            return Err(TiosaError::BadRequest("title and url are required".into()));
        }
        let id = match id {
            Some(id) => id.to_string(),
            None => utils::generate_id(),
        };
        Ok(Bookmark::new(
            id,
            title,
            url,
            self.description.trim(),
            self.category.as_str(),
            parse_tags(&self.tags),
        ))
    }
}

pub struct Controller<B: Backend> {
    backend: B,
    bookmarks: Vec<Bookmark>,
    categories: Vec<Category>,
    admin_password: String,
    search_query: String,
    active_category: String,
    is_admin: bool,
    dragged_item_id: Option<String>,
    editing_bookmark: Option<Bookmark>,
    show_login: bool,
    show_admin_panel: bool,
    admin_tab: AdminTab,
    login_error: Option<String>,
    feedback: Option<String>,
}

impl<B: Backend> Controller<B> {
    /// Start from the compiled-in defaults; call [`Controller::load`] to sync.
    pub fn new(backend: B) -> Self {
        let Document {
            categories,
            bookmarks,
            admin_password,
        } = Document::seed();
        Self {
            backend,
            bookmarks,
            categories,
            admin_password,
            search_query: String::new(),
            active_category: ALL_CATEGORY.to_string(),
            is_admin: false,
            dragged_item_id: None,
            editing_bookmark: None,
            show_login: false,
            show_admin_panel: false,
            admin_tab: AdminTab::default(),
            login_error: None,
            feedback: None,
        }
    }

    /// Replace local state from the backend. On failure the current state is
    /// kept and `false` is returned.
    pub fn load(&mut self) -> bool {
        match self.backend.get_state() {
            Ok(doc) => {
                self.replace_document(doc);
                true
            }
            Err(e) => {
                log::warn!("Failed to load remote state, using defaults: {}", e);
                false
            }
        }
    }

    fn replace_document(&mut self, doc: Document) {
        self.categories = doc.categories;
        self.bookmarks = doc.bookmarks;
        self.admin_password = doc.admin_password;
    }

    fn require_admin(&self) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(TiosaError::AdminRequired)
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn dragged_item_id(&self) -> Option<&str> {
        self.dragged_item_id.as_deref()
    }

    pub fn editing_bookmark(&self) -> Option<&Bookmark> {
        self.editing_bookmark.as_ref()
    }

    pub fn show_login(&self) -> bool {
        self.show_login
    }

    pub fn show_admin_panel(&self) -> bool {
        self.show_admin_panel
    }

    pub fn admin_tab(&self) -> AdminTab {
        self.admin_tab
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    // --- filtering ---

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn set_active_category(&mut self, id: &str) {
        if self.active_category != id {
            log::debug!("Switching category {} -> {}", self.active_category, id);
            self.active_category = id.to_string();
        }
    }

    /// Bookmarks passing both the search query and the category filter, in list order
    pub fn visible_bookmarks(&self) -> Vec<&Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| b.matches_query(&self.search_query))
            .filter(|b| b.in_category(&self.active_category))
            .collect()
    }

    pub fn active_category_name(&self) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == self.active_category)
            .map(|c| c.name.as_str())
            .unwrap_or(&self.active_category)
    }

    // --- session ---

    pub fn open_login(&mut self) {
        self.show_login = true;
        self.login_error = None;
    }

    pub fn close_login(&mut self) {
        self.show_login = false;
        self.login_error = None;
    }

    pub fn login(&mut self, password: &str) -> bool {
        if password == self.admin_password {
            self.is_admin = true;
            self.login_error = None;
            self.show_login = false;
            log::debug!("Admin mode enabled");
            true
        } else {
            self.login_error = Some(LOGIN_FAILED.to_string());
            false
        }
    }

    pub fn logout(&mut self) {
        self.is_admin = false;
        self.show_admin_panel = false;
        self.editing_bookmark = None;
        self.dragged_item_id = None;
    }

    // --- admin panel ---

    pub fn open_admin_panel(&mut self) -> Result<()> {
        self.require_admin()?;
        self.editing_bookmark = None;
        self.admin_tab = AdminTab::Categories;
        self.show_admin_panel = true;
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<()> {
        self.require_admin()?;
        self.admin_tab = AdminTab::Settings;
        self.show_admin_panel = true;
        Ok(())
    }

    /// Open the panel on the bookmark form with `id` loaded
    pub fn edit_bookmark(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        let bookmark = self
            .bookmarks
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| TiosaError::NotFound(format!("bookmark {}", id)))?;
        self.editing_bookmark = Some(bookmark);
        self.admin_tab = AdminTab::Bookmarks;
        self.show_admin_panel = true;
        Ok(())
    }

    pub fn new_bookmark(&mut self) -> Result<()> {
        self.require_admin()?;
        self.editing_bookmark = None;
        self.admin_tab = AdminTab::Bookmarks;
        self.show_admin_panel = true;
        Ok(())
    }

    pub fn close_admin_panel(&mut self) {
        self.show_admin_panel = false;
        self.editing_bookmark = None;
    }

    /// Form contents for the current panel: the edited bookmark, or an empty
    /// bookmark filed under the active category (first real category under "all")
    pub fn draft(&self) -> BookmarkDraft {
        match &self.editing_bookmark {
            Some(bookmark) => BookmarkDraft::from_bookmark(bookmark),
            None => self.new_bookmark_draft(),
        }
    }

    pub fn new_bookmark_draft(&self) -> BookmarkDraft {
        let category = if self.active_category != ALL_CATEGORY {
            self.active_category.clone()
        } else {
            self.categories
                .iter()
                .find(|c| c.id != ALL_CATEGORY)
                .map(|c| c.id.clone())
                .unwrap_or_else(|| ALL_CATEGORY.to_string())
        };
        BookmarkDraft {
            category,
            ..Default::default()
        }
    }

    /// Fill title, description and tags from the provider. Only http(s)-looking
    /// urls are looked up. Returns whether the draft changed.
    pub fn autofill(&self, draft: &mut BookmarkDraft, provider: &dyn MetadataProvider) -> bool {
        let url = draft.url.trim().to_string();
        if !url.starts_with("http") {
            return false;
        }
        match provider.fetch(&url) {
            Some(meta) => {
                draft.title = meta.title;
                draft.description = meta.description;
                draft.tags = format_tags(&meta.tags);
                true
            }
            None => false,
        }
    }

    // --- bookmarks ---

    /// Upsert; the local list is replaced from the response
    pub fn save_bookmark(&mut self, mut bookmark: Bookmark) -> Result<()> {
        self.require_admin()?;
        if bookmark.id.is_empty() {
            bookmark.id = utils::generate_id();
        }
        match self.backend.save_bookmark(&bookmark) {
            Ok(payload) => {
                self.bookmarks = payload.bookmarks;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save bookmark {}: {}", bookmark.id, e);
                Err(e)
            }
        }
    }

    /// Submit the panel form, then close the panel
    pub fn submit_draft(&mut self, draft: &BookmarkDraft) -> Result<()> {
        self.require_admin()?;
        let id = self.editing_bookmark.as_ref().map(|b| b.id.clone());
        let bookmark = draft.to_bookmark(id.as_deref())?;
        self.save_bookmark(bookmark)?;
        self.close_admin_panel();
        Ok(())
    }

    pub fn delete_bookmark(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        match self.backend.delete_bookmark(id) {
            Ok(payload) => {
                self.bookmarks = payload.bookmarks;
                if self.editing_bookmark.as_ref().is_some_and(|b| b.id == id) {
                    self.editing_bookmark = None;
                }
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete bookmark {}: {}", id, e);
                Err(e)
            }
        }
    }

    // --- categories ---

    /// Add a category whose id is derived from its name
    pub fn add_category(&mut self, name: &str, icon: &str) -> Result<()> {
        self.require_admin()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(TiosaError::BadRequest("category name is required".into()));
        }
        let category = Category::new(utils::slugify(name), name, icon);
        match self.backend.add_category(&category) {
            Ok(payload) => {
                self.categories = payload.categories;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to add category {}: {}", category.id, e);
                Err(e)
            }
        }
    }

    pub fn delete_category(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        if id == ALL_CATEGORY {
            return Err(TiosaError::BadRequest(ERR_DELETE_ALL.into()));
        }
        match self.backend.delete_category(id) {
            Ok(payload) => {
                self.categories = payload.categories;
                self.bookmarks = payload.bookmarks;
                if self.active_category == id {
                    self.active_category = ALL_CATEGORY.to_string();
                }
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete category {}: {}", id, e);
                Err(e)
            }
        }
    }

    // --- drag reorder (local only) ---

    pub fn start_drag(&mut self, id: &str) -> Result<()> {
        self.require_admin()?;
        self.dragged_item_id = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.dragged_item_id = None;
    }

    /// Release the dragged item over `target_id`. The drag always ends.
    /// Returns whether the order changed.
    pub fn drop_on_card(&mut self, target_id: &str, side: DropSide) -> bool {
        let dragged = self.dragged_item_id.take();
        match dragged {
            Some(dragged) if self.is_admin => {
                reorder(&mut self.bookmarks, &dragged, target_id, side)
            }
            _ => false,
        }
    }

    /// Release the dragged item over empty grid space: it moves to the end
    pub fn drop_on_grid(&mut self) -> bool {
        let dragged = self.dragged_item_id.take();
        match dragged {
            Some(dragged) if self.is_admin => move_to_end(&mut self.bookmarks, &dragged),
            _ => false,
        }
    }

    // --- settings ---

    pub fn update_password(&mut self, password: &str) -> Result<()> {
        self.require_admin()?;
        if password.is_empty() {
            return Err(TiosaError::BadRequest("password is required".into()));
        }
        match self.backend.update_password(password) {
            Ok(payload) => {
                self.admin_password = payload.admin_password;
                self.feedback = Some(PASSWORD_RESET.to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to update password: {}", e);
                Err(e)
            }
        }
    }

    /// Download the document from the backend and write it under `target`
    pub fn export_to(&mut self, target: &Path) -> Result<PathBuf> {
        self.require_admin()?;
        let result = self
            .backend
            .export()
            .and_then(|doc| import_export::write_export(&doc, target));
        match result {
            Ok(path) => {
                self.feedback = None;
                Ok(path)
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.feedback = Some(EXPORT_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Replace everything with the document in `path`; local state follows the backend
    pub fn import_from(&mut self, path: &Path) -> Result<()> {
        self.require_admin()?;
        let result = import_export::read_import(path).and_then(|v| self.backend.import(&v));
        match result {
            Ok(doc) => {
                self.replace_document(doc);
                self.editing_bookmark = None;
                self.feedback = Some(IMPORT_SUCCEEDED.to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Import of {} failed: {}", path.display(), e);
                self.feedback = Some(IMPORT_FAILED.to_string());
                Err(e)
            }
        }
    }
}

/// Move `dragged` next to `target`. Self-drops and unknown ids change nothing.
pub fn reorder(list: &mut Vec<Bookmark>, dragged: &str, target: &str, side: DropSide) -> bool {
    if dragged == target || !list.iter().any(|b| b.id == target) {
        return false;
    }
    let Some(from) = list.iter().position(|b| b.id == dragged) else {
        return false;
    };
    let item = list.remove(from);
    // target index is looked up after removal
    let Some(to) = list.iter().position(|b| b.id == target) else {
        list.insert(from, item);
        return false;
    };
    let at = match side {
        DropSide::Before => to,
        DropSide::After => to + 1,
    };
    list.insert(at, item);
    true
}

pub fn move_to_end(list: &mut Vec<Bookmark>, dragged: &str) -> bool {
    let Some(from) = list.iter().position(|b| b.id == dragged) else {
        return false;
    };
    let item = list.remove(from);
    list.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StoreBackend;
    use crate::models::{
        BookmarksPayload, CategoriesPayload, CategoryDeletePayload, PasswordPayload,
        WebsiteMetadata,
    };
    use crate::store::JsonStore;
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct TestEnv {
        dir: TempDir,
        ctl: Controller<StoreBackend>,
    }

    impl TestEnv {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let store = JsonStore::open(&dir.path().join("data.json"));
            let mut ctl = Controller::new(StoreBackend::new(store));
            assert!(ctl.load());
            Self { dir, ctl }
        }

        fn admin() -> Self {
            let mut env = Self::new();
            assert!(env.ctl.login("admin"));
            env
        }

        fn stored(&self) -> Document {
            self.ctl.backend().store().load().unwrap()
        }
    }

    /// Every call fails as if the server were down
    struct OfflineBackend;

    fn offline<T>() -> Result<T> {
        Err(TiosaError::Other("connection refused".into()))
    }

    impl Backend for OfflineBackend {
        fn get_state(&self) -> Result<Document> {
            offline()
        }
        fn save_bookmark(&self, _: &Bookmark) -> Result<BookmarksPayload> {
            offline()
        }
        fn delete_bookmark(&self, _: &str) -> Result<BookmarksPayload> {
            offline()
        }
        fn add_category(&self, _: &Category) -> Result<CategoriesPayload> {
            offline()
        }
        fn delete_category(&self, _: &str) -> Result<CategoryDeletePayload> {
            offline()
        }
        fn update_password(&self, _: &str) -> Result<PasswordPayload> {
            offline()
        }
        fn export(&self) -> Result<Document> {
            offline()
        }
        fn import(&self, _: &Value) -> Result<Document> {
            offline()
        }
    }

    struct StubProvider {
        answer: Option<WebsiteMetadata>,
        calls: Cell<usize>,
    }

    impl MetadataProvider for StubProvider {
        fn lookup(&self, _url: &str) -> Result<Option<WebsiteMetadata>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.clone())
        }
    }

    fn titles(list: &[&Bookmark]) -> Vec<String> {
        list.iter().map(|b| b.title.clone()).collect()
    }

    fn ids(list: &[Bookmark]) -> Vec<&str> {
        list.iter().map(|b| b.id.as_str()).collect()
    }

    fn four() -> Vec<Bookmark> {
        ["a", "b", "c", "d"]
            .iter()
            .map(|id| Bookmark::new(*id, id.to_uppercase(), format!("https://{}.dev", id), "", "all", vec![]))
            .collect()
    }

    #[test]
    fn test_offline_load_keeps_defaults() {
        let mut ctl = Controller::new(OfflineBackend);
        assert!(!ctl.load());
        assert_eq!(ctl.bookmarks().len(), 4);
        assert_eq!(ctl.categories().len(), 5);
        assert_eq!(ctl.admin_password(), "admin");
        assert_eq!(ctl.active_category(), "all");
    }

    #[test]
    fn test_offline_mutations_leave_state_alone() {
        let mut ctl = Controller::new(OfflineBackend);
        assert!(ctl.login("admin"));

        let bookmark = Bookmark::new("9", "Rust", "https://rust-lang.org", "", "dev", vec![]);
        assert!(ctl.save_bookmark(bookmark).is_err());
        assert!(ctl.delete_bookmark("1").is_err());
        assert!(ctl.add_category("News", "Globe").is_err());
        assert!(ctl.delete_category("dev").is_err());
        assert!(ctl.update_password("x").is_err());

        assert_eq!(ids(ctl.bookmarks()), vec!["1", "2", "3", "4"]);
        assert_eq!(ctl.categories().len(), 5);
        assert_eq!(ctl.admin_password(), "admin");
    }

    #[test]
    fn test_search_and_category_filter() {
        let env_dir = TempDir::new().unwrap();
        let store = JsonStore::open(&env_dir.path().join("data.json"));
        let mut doc = Document::seed();
        doc.bookmarks = vec![
            Bookmark::new("1", "GitHub", "https://github.com", "", "dev", vec![]),
            Bookmark::new("2", "Figma", "https://figma.com", "", "design", vec![]),
        ];
        store.save(&doc).unwrap();
        let mut ctl = Controller::new(StoreBackend::new(store));
        ctl.load();

        for query in ["git", "GIT", "Git"] {
            ctl.set_search_query(query);
            assert_eq!(titles(&ctl.visible_bookmarks()), vec!["GitHub"]);
        }

        ctl.set_active_category("design");
        assert!(ctl.visible_bookmarks().is_empty());

        ctl.set_search_query("");
        assert_eq!(titles(&ctl.visible_bookmarks()), vec!["Figma"]);
    }

    #[test]
    fn test_search_matches_tags_and_description() {
        let mut env = TestEnv::new();
        env.ctl.set_search_query("llm");
        assert_eq!(titles(&env.ctl.visible_bookmarks()), vec!["Gemini AI"]);

        env.ctl.set_search_query("协作");
        assert_eq!(titles(&env.ctl.visible_bookmarks()), vec!["Figma"]);
    }

    #[test]
    fn test_active_category_name() {
        let mut env = TestEnv::new();
        assert_eq!(env.ctl.active_category_name(), "全部链接");
        env.ctl.set_active_category("ai");
        assert_eq!(env.ctl.active_category_name(), "人工智能");
    }

    #[test]
    fn test_login_and_logout() {
        let mut env = TestEnv::new();
        env.ctl.open_login();

        assert!(!env.ctl.login("wrong"));
        assert!(!env.ctl.is_admin());
        assert_eq!(env.ctl.login_error(), Some(LOGIN_FAILED));
        assert!(env.ctl.show_login());

        assert!(env.ctl.login("admin"));
        assert!(env.ctl.is_admin());
        assert_eq!(env.ctl.login_error(), None);
        assert!(!env.ctl.show_login());

        env.ctl.edit_bookmark("1").unwrap();
        env.ctl.logout();
        assert!(!env.ctl.is_admin());
        assert!(!env.ctl.show_admin_panel());
        assert!(env.ctl.editing_bookmark().is_none());
    }

    #[test]
    fn test_admin_ops_need_login() {
        let mut env = TestEnv::new();
        let bookmark = Bookmark::new("", "x", "https://x.io", "", "dev", vec![]);

        assert!(matches!(env.ctl.save_bookmark(bookmark), Err(TiosaError::AdminRequired)));
        assert!(matches!(env.ctl.delete_bookmark("1"), Err(TiosaError::AdminRequired)));
        assert!(matches!(env.ctl.add_category("N", "Zap"), Err(TiosaError::AdminRequired)));
        assert!(matches!(env.ctl.start_drag("1"), Err(TiosaError::AdminRequired)));
        assert!(matches!(env.ctl.open_admin_panel(), Err(TiosaError::AdminRequired)));
        assert_eq!(env.stored(), Document::seed());
    }

    #[test]
    fn test_save_bookmark_replaces_from_response() {
        let mut env = TestEnv::admin();
        let bookmark = Bookmark::new("", "Rust", "https://rust-lang.org", "", "dev", vec![]);
        env.ctl.save_bookmark(bookmark).unwrap();

        assert_eq!(env.ctl.bookmarks().len(), 5);
        assert_eq!(env.ctl.bookmarks()[0].title, "Rust");
        assert!(!env.ctl.bookmarks()[0].id.is_empty());
        assert_eq!(env.ctl.bookmarks(), env.stored().bookmarks.as_slice());
    }

    #[test]
    fn test_submit_draft_edits_in_place() {
        let mut env = TestEnv::admin();
        env.ctl.edit_bookmark("2").unwrap();
        assert_eq!(env.ctl.admin_tab(), AdminTab::Bookmarks);

        let mut draft = env.ctl.draft();
        assert_eq!(draft.tags, "设计, UI, UX");
        draft.title = "Figma Pro".into();
        draft.tags = "design, , ui ".into();
        env.ctl.submit_draft(&draft).unwrap();

        assert!(!env.ctl.show_admin_panel());
        assert_eq!(ids(env.ctl.bookmarks()), vec!["1", "2", "3", "4"]);
        assert_eq!(env.ctl.bookmarks()[1].title, "Figma Pro");
        assert_eq!(env.ctl.bookmarks()[1].tags, vec!["design", "ui"]);
    }

    #[test]
    fn test_submit_draft_requires_title_and_url() {
        let mut env = TestEnv::admin();
        env.ctl.new_bookmark().unwrap();
        let draft = BookmarkDraft {
            url: "https://only-url.dev".into(),
            ..Default::default()
        };
        assert!(matches!(env.ctl.submit_draft(&draft), Err(TiosaError::BadRequest(_))));
        assert!(env.ctl.show_admin_panel());
        assert_eq!(env.ctl.bookmarks().len(), 4);
    }

    #[test]
    fn test_delete_bookmark_clears_editing() {
        let mut env = TestEnv::admin();
        env.ctl.edit_bookmark("3").unwrap();
        env.ctl.delete_bookmark("3").unwrap();

        assert!(env.ctl.editing_bookmark().is_none());
        assert_eq!(ids(env.ctl.bookmarks()), vec!["1", "2", "4"]);

        // unknown ids are fine
        env.ctl.delete_bookmark("3").unwrap();
        assert_eq!(env.ctl.bookmarks().len(), 3);
    }

    #[test]
    fn test_add_category_slugifies_name() {
        let mut env = TestEnv::admin();
        env.ctl.add_category("Reading List", "Globe").unwrap();

        let added = env.ctl.categories().last().unwrap();
        assert_eq!(added.id, "reading-list");
        assert_eq!(added.name, "Reading List");

        assert!(matches!(
            env.ctl.add_category("reading list", "Zap"),
            Err(TiosaError::Conflict(_))
        ));
        assert_eq!(env.ctl.categories().len(), 6);
    }

    #[test]
    fn test_delete_category_cascades_and_resets_filter() {
        let mut env = TestEnv::admin();
        env.ctl.set_active_category("design");
        env.ctl.delete_category("design").unwrap();

        assert_eq!(env.ctl.active_category(), "all");
        assert!(env.ctl.categories().iter().all(|c| c.id != "design"));
        let cats: Vec<&str> = env.ctl.bookmarks().iter().map(|b| b.category.as_str()).collect();
        assert_eq!(cats, vec!["dev", "all", "ai", "all"]);
    }

    #[test]
    fn test_delete_all_category_refused_locally() {
        let mut env = TestEnv::admin();
        assert!(matches!(env.ctl.delete_category("all"), Err(TiosaError::BadRequest(_))));
        assert_eq!(env.ctl.categories().len(), 5);
    }

    #[rstest]
    #[case("d", "b", DropSide::Before, vec!["a", "d", "b", "c"])]
    #[case("a", "c", DropSide::Before, vec!["b", "a", "c", "d"])]
    #[case("a", "c", DropSide::After, vec!["b", "c", "a", "d"])]
    #[case("d", "a", DropSide::Before, vec!["d", "a", "b", "c"])]
    #[case("b", "d", DropSide::After, vec!["a", "c", "d", "b"])]
    fn test_reorder(
        #[case] dragged: &str,
        #[case] target: &str,
        #[case] side: DropSide,
        #[case] expected: Vec<&str>,
    ) {
        let mut list = four();
        assert!(reorder(&mut list, dragged, target, side));
        assert_eq!(ids(&list), expected);
    }

    #[rstest]
    #[case("b", "b")]
    #[case("x", "b")]
    #[case("b", "x")]
    fn test_reorder_noop(#[case] dragged: &str, #[case] target: &str) {
        let mut list = four();
        assert!(!reorder(&mut list, dragged, target, DropSide::Before));
        assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);
    }

    #[rstest]
    #[case(10.0, 200.0, DropSide::Before)]
    #[case(99.9, 200.0, DropSide::Before)]
    #[case(100.0, 200.0, DropSide::After)]
    #[case(180.0, 200.0, DropSide::After)]
    fn test_drop_side(#[case] x: f64, #[case] width: f64, #[case] expected: DropSide) {
        assert_eq!(DropSide::from_offset(x, width), expected);
    }

    #[test]
    fn test_drag_is_local_only() {
        let mut env = TestEnv::admin();
        env.ctl.start_drag("4").unwrap();
        assert!(env.ctl.drop_on_card("2", DropSide::Before));
        assert_eq!(ids(env.ctl.bookmarks()), vec!["1", "4", "2", "3"]);
        assert!(env.ctl.dragged_item_id().is_none());

        env.ctl.start_drag("1").unwrap();
        assert!(env.ctl.drop_on_grid());
        assert_eq!(ids(env.ctl.bookmarks()), vec!["4", "2", "3", "1"]);

        assert_eq!(ids(&env.stored().bookmarks), vec!["1", "2", "3", "4"]);
        env.ctl.load();
        assert_eq!(ids(env.ctl.bookmarks()), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_drop_without_drag_or_on_self() {
        let mut env = TestEnv::admin();
        assert!(!env.ctl.drop_on_card("2", DropSide::After));
        assert!(!env.ctl.drop_on_grid());

        env.ctl.start_drag("2").unwrap();
        assert!(!env.ctl.drop_on_card("2", DropSide::After));
        assert!(env.ctl.dragged_item_id().is_none());
        assert_eq!(ids(env.ctl.bookmarks()), vec!["1", "2", "3", "4"]);
    }

    #[rstest]
    #[case("all", "dev")]
    #[case("design", "design")]
    fn test_new_bookmark_draft_category(#[case] active: &str, #[case] expected: &str) {
        let mut env = TestEnv::new();
        env.ctl.set_active_category(active);
        assert_eq!(env.ctl.new_bookmark_draft().category, expected);
    }

    #[test]
    fn test_autofill() {
        let env = TestEnv::new();
        let provider = StubProvider {
            answer: Some(WebsiteMetadata {
                title: "Rust".into(),
                description: "A language".into(),
                tags: vec!["lang".into(), "systems".into()],
            }),
            calls: Cell::new(0),
        };

        let mut draft = env.ctl.new_bookmark_draft();
        draft.url = "rust-lang.org".into();
        assert!(!env.ctl.autofill(&mut draft, &provider));
        assert_eq!(provider.calls.get(), 0);

        draft.url = "https://rust-lang.org".into();
        assert!(env.ctl.autofill(&mut draft, &provider));
        assert_eq!(draft.title, "Rust");
        assert_eq!(draft.tags, "lang, systems");
        assert_eq!(draft.category, "dev");
    }

    #[test]
    fn test_autofill_without_answer_keeps_draft() {
        let env = TestEnv::new();
        let provider = StubProvider {
            answer: None,
            calls: Cell::new(0),
        };
        let mut draft = BookmarkDraft {
            url: "https://example.com".into(),
            title: "Mine".into(),
            ..Default::default()
        };
        assert!(!env.ctl.autofill(&mut draft, &provider));
        assert_eq!(draft.title, "Mine");
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn test_update_password() {
        let mut env = TestEnv::admin();
        env.ctl.update_password("s3cret").unwrap();
        assert_eq!(env.ctl.admin_password(), "s3cret");
        assert_eq!(env.ctl.feedback(), Some(PASSWORD_RESET));

        env.ctl.logout();
        assert!(!env.ctl.login("admin"));
        assert!(env.ctl.login("s3cret"));
    }

    #[test]
    fn test_export_then_import() {
        let mut env = TestEnv::admin();
        let path = env.ctl.export_to(env.dir.path()).unwrap();

        env.ctl.delete_bookmark("1").unwrap();
        assert_eq!(env.ctl.bookmarks().len(), 3);

        env.ctl.import_from(&path).unwrap();
        assert_eq!(env.ctl.feedback(), Some(IMPORT_SUCCEEDED));
        assert_eq!(env.ctl.bookmarks().len(), 4);
        assert_eq!(env.stored(), Document::seed());
    }

    #[test]
    fn test_import_failures_set_feedback() {
        let mut env = TestEnv::admin();
        let garbage = env.dir.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert!(env.ctl.import_from(&garbage).is_err());
        assert_eq!(env.ctl.feedback(), Some(IMPORT_FAILED));

        let partial = env.dir.path().join("partial.json");
        fs::write(&partial, json!({"bookmarks": [], "categories": []}).to_string()).unwrap();
        assert!(matches!(env.ctl.import_from(&partial), Err(TiosaError::BadRequest(_))));
        assert_eq!(env.stored(), Document::seed());
    }

    #[test]
    fn test_export_failure_sets_feedback() {
        let mut ctl = Controller::new(OfflineBackend);
        ctl.login("admin");
        let dir = TempDir::new().unwrap();
        assert!(ctl.export_to(dir.path()).is_err());
        assert_eq!(ctl.feedback(), Some(EXPORT_FAILED));
    }
}
