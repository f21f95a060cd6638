use super::{require_category, AppContext, TiosaCommand};
use crate::fetch_ui::autofill_with_spinner;
use serde::{Deserialize, Serialize};
use tiosa::controller::BookmarkDraft;
use tiosa::error::Result;
use tiosa::metadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommand {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Comma-separated, as typed in the edit form
    pub tags: Option<String>,
    pub offline: bool,
}

impl AddCommand {
    /// Explicit flags win over whatever autofill produced
    fn apply(&self, draft: &mut BookmarkDraft) {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            draft.tags = tags.clone();
        }
        if draft.title.trim().is_empty() {
            draft.title = self.url.clone();
        }
    }
}

impl TiosaCommand for AddCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;
        ctl.new_bookmark()?;

        let mut draft = ctl.draft();
        draft.url = self.url.clone();
        if let Some(category) = &self.category {
            require_category(&ctl, category)?;
            draft.category = category.clone();
        }

        if !self.offline {
            let provider = metadata::provider_from_config(&ctx.config.metadata);
            autofill_with_spinner(&ctl, &mut draft, provider.as_ref());
        }
        self.apply(&mut draft);

        ctl.submit_draft(&draft)?;
        if let Some(added) = ctl.bookmarks().first() {
            eprintln!("Added bookmark {} ({})", added.id, added.title);
        }
        Ok(())
    }
}
