use super::{confirm, AppContext, TiosaCommand};
use serde::{Deserialize, Serialize};
use tiosa::error::{Result, TiosaError};
use tiosa::models::CategoryIcon;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAddCommand {
    pub name: String,
    pub icon: String,
}

/// Only the icons offered by the category form are accepted
pub fn parse_icon(name: &str) -> Result<CategoryIcon> {
    CategoryIcon::PICKABLE
        .into_iter()
        .find(|icon| icon.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let names: Vec<&str> = CategoryIcon::PICKABLE.iter().map(|i| i.name()).collect();
            TiosaError::BadRequest(format!(
                "unknown icon {:?}, pick one of: {}",
                name,
                names.join(", ")
            ))
        })
}

impl TiosaCommand for CategoryAddCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let icon = parse_icon(&self.icon)?;
        let mut ctl = ctx.admin_session()?;
        ctl.add_category(&self.name, icon.name())?;
        if let Some(added) = ctl.categories().last() {
            eprintln!("Added category {} {} ({})", added.glyph(), added.name, added.id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDeleteCommand {
    pub id: String,
    pub force: bool,
}

impl TiosaCommand for CategoryDeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;
        let moved = ctl
            .bookmarks()
            .iter()
            .filter(|b| b.category == self.id)
            .count();

        if !self.force && moved > 0 {
            let prompt = format!(
                "Delete category {}? {} bookmark(s) will move to \"all\".",
                self.id, moved
            );
            if !confirm(&prompt)? {
                eprintln!("Deletion cancelled.");
                return Ok(());
            }
        }

        ctl.delete_category(&self.id)?;
        eprintln!("Deleted category {}", self.id);
        Ok(())
    }
}
