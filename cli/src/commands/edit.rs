use super::{require_category, AppContext, TiosaCommand};
use crate::fetch_ui::autofill_with_spinner;
use serde::{Deserialize, Serialize};
use tiosa::error::Result;
use tiosa::metadata;

/// Edit one bookmark through the admin form. Unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditCommand {
    pub id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    /// Refill title, description and tags from the metadata provider first
    pub ai: bool,
}

impl TiosaCommand for EditCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;
        ctl.edit_bookmark(&self.id)?;

        let mut draft = ctl.draft();
        if let Some(url) = &self.url {
            draft.url = url.clone();
        }
        if self.ai {
            let provider = metadata::provider_from_config(&ctx.config.metadata);
            autofill_with_spinner(&ctl, &mut draft, provider.as_ref());
        }
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(category) = &self.category {
            require_category(&ctl, category)?;
            draft.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            draft.tags = tags.clone();
        }

        ctl.submit_draft(&draft)?;
        eprintln!("Updated bookmark {}", self.id);
        Ok(())
    }
}
