use super::{confirm, AppContext, TiosaCommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tiosa::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCommand {
    /// Target file, or a directory that receives a timestamped file
    pub path: PathBuf,
}

impl TiosaCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;
        match ctl.export_to(&self.path) {
            Ok(path) => {
                eprintln!("Exported to {}", path.display());
                Ok(())
            }
            Err(e) => {
                if let Some(message) = ctl.feedback() {
                    eprintln!("{}", message);
                }
                Err(e)
            }
        }
    }
}

/// Replace the whole document (bookmarks, categories and password) from a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommand {
    pub file: PathBuf,
    pub force: bool,
}

impl TiosaCommand for ImportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;
        if !self.force
            && !confirm("Replace all bookmarks, categories and the admin password?")?
        {
            eprintln!("Import cancelled.");
            return Ok(());
        }

        let result = ctl.import_from(&self.file);
        if let Some(message) = ctl.feedback() {
            eprintln!("{}", message);
        }
        result?;
        eprintln!(
            "{} bookmark(s) in {} categories",
            ctl.bookmarks().len(),
            ctl.categories().len()
        );
        Ok(())
    }
}
