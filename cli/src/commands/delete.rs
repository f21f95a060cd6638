use super::{confirm, AppContext, TiosaCommand};
use serde::{Deserialize, Serialize};
use tiosa::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommand {
    pub ids: Vec<String>,
    pub force: bool,
}

impl TiosaCommand for DeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;

        let targets: Vec<String> = self
            .ids
            .iter()
            .filter(|id| {
                let known = ctl.bookmarks().iter().any(|b| &b.id == *id);
                if !known {
                    eprintln!("Bookmark {} not found", id);
                }
                known
            })
            .cloned()
            .collect();

        if targets.is_empty() {
            eprintln!("No bookmarks to delete.");
            return Ok(());
        }

        eprintln!("Bookmarks to be deleted:");
        for bookmark in ctl.bookmarks().iter().filter(|b| targets.contains(&b.id)) {
            eprintln!("  {}. {} - {}", bookmark.id, bookmark.title, bookmark.url);
        }

        if !self.force && !confirm(&format!("\nDelete {} bookmark(s)?", targets.len()))? {
            eprintln!("Deletion cancelled.");
            return Ok(());
        }

        for id in &targets {
            ctl.delete_bookmark(id)?;
        }
        eprintln!("Deleted {} bookmark(s)", targets.len());
        Ok(())
    }
}
