use super::{AppContext, TiosaCommand};
use crate::fetch_ui::lookup_with_spinner;
use crate::format::OutputFormat;
use crate::interactive;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tiosa::error::{Result, TiosaError};
use tiosa::models::WebsiteMetadata;
use tiosa::{browser, metadata, server};

/// Run the HTTP API in the foreground
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServeCommand {
    pub bind: Option<String>,
    pub data_file: Option<PathBuf>,
}

impl TiosaCommand for ServeCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut config = ctx.config.server.clone();
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }

        eprintln!(
            "Serving {} on http://{} (Ctrl-C to stop)",
            config.data_file.display(),
            config.bind
        );
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(server::serve(&config))
    }
}

/// Ask the configured provider for a URL's title, description and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCommand {
    pub url: String,
}

pub fn render_metadata(meta: &WebsiteMetadata, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(meta).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(meta).unwrap_or_default(),
        _ => format!(
            "title: {}\ndescription: {}\ntags: {}",
            meta.title,
            meta.description,
            meta.tags.join(", ")
        ),
    }
}

impl TiosaCommand for MetaCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let provider = metadata::provider_from_config(&ctx.config.metadata);
        match lookup_with_spinner(&self.url, provider.as_ref())? {
            Some(meta) => println!("{}", render_metadata(&meta, ctx.format)),
            None => eprintln!("No metadata for {}", self.url),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenCommand {
    pub ids: Vec<String>,
}

impl TiosaCommand for OpenCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        if self.ids.is_empty() {
            return Err(TiosaError::BadRequest("no bookmark id given".into()));
        }
        let ctl = ctx.session();
        for id in &self.ids {
            match ctl.bookmarks().iter().find(|b| &b.id == id) {
                Some(bookmark) => {
                    eprintln!("Opening: {}", bookmark.url);
                    browser::open_url(&bookmark.url)?;
                }
                None => eprintln!("Bookmark {} not found", id),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellCommand;

impl TiosaCommand for ShellCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        interactive::run_with_context(ctx)
    }
}
