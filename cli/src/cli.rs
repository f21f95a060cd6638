use crate::commands::{
    add::AddCommand,
    category::{CategoryAddCommand, CategoryDeleteCommand},
    delete::DeleteCommand,
    edit::EditCommand,
    import_export::{ExportCommand, ImportCommand},
    list::{CategoriesCommand, ListCommand},
    misc::{MetaCommand, OpenCommand, ServeCommand, ShellCommand},
    password::PasswordCommand,
    AppContext, CommandEnum,
};
use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tiosa::client::{ApiClient, Backend, StoreBackend};
use tiosa::config::Config;
use tiosa::error::Result;
use tiosa::store::JsonStore;

#[derive(Parser)]
#[command(author, version, about = "Personal bookmark manager", long_about = None)]
pub struct Cli {
    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Work on a local data file instead of talking to the API
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:3001/api
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Admin password for commands that change data (prompted when absent)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug", global = true)]
    pub debug: bool,

    /// Output format: colored (default), plain, json, yaml
    #[arg(short = 'f', long, global = true)]
    pub format: Option<String>,

    /// Search keywords (when no subcommand is provided)
    #[arg(name = "KEYWORD")]
    pub keywords: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen address, e.g. 0.0.0.0:3001
        #[arg(long)]
        bind: Option<String>,

        /// Data file (default: data.json in the working directory)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// List bookmarks, optionally filtered
    List {
        /// Match title, description or tags (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only bookmarks in this category id
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a bookmark (metadata is filled in by the AI provider unless --offline)
    Add {
        url: String,

        #[arg(long)]
        title: Option<String>,

        /// Description
        #[arg(short = 'c', long)]
        comment: Option<String>,

        /// Category id
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tag: Option<String>,

        /// Skip the metadata provider
        #[arg(long)]
        offline: bool,
    },

    /// Edit a bookmark; unset options keep their value
    Edit {
        id: String,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(short = 'c', long)]
        comment: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long)]
        tag: Option<String>,

        /// Refill title, description and tags from the metadata provider
        #[arg(long)]
        ai: bool,
    },

    /// Delete bookmark(s)
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List categories
    Categories,

    /// Add a category; its id is derived from the name
    CategoryAdd {
        name: String,

        /// Circle, Code, Palette, Cpu, Globe or Zap
        #[arg(long, default_value = "Circle")]
        icon: String,
    },

    /// Delete a category; its bookmarks move to "all"
    CategoryDelete {
        id: String,

        #[arg(long)]
        force: bool,
    },

    /// Change the admin password
    Password {
        /// New password (prompted when absent)
        new_password: Option<String>,
    },

    /// Export everything to a JSON file
    Export {
        /// File or directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Replace everything from an exported JSON file
    Import {
        file: PathBuf,

        #[arg(long)]
        force: bool,
    },

    /// Look up title, description and tags for a URL
    Meta { url: String },

    /// Open bookmark(s) in the browser
    Open {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Interactive shell
    Shell,
}

impl Commands {
    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::Serve { bind, data_file } => {
                CommandEnum::Serve(ServeCommand { bind, data_file })
            }
            Commands::List { search, category } => CommandEnum::List(ListCommand {
                query: search,
                category,
            }),
            Commands::Add {
                url,
                title,
                comment,
                category,
                tag,
                offline,
            } => CommandEnum::Add(AddCommand {
                url,
                title,
                description: comment,
                category,
                tags: tag,
                offline,
            }),
            Commands::Edit {
                id,
                url,
                title,
                comment,
                category,
                tag,
                ai,
            } => CommandEnum::Edit(EditCommand {
                id,
                url,
                title,
                description: comment,
                category,
                tags: tag,
                ai,
            }),
            Commands::Delete { ids, force } => CommandEnum::Delete(DeleteCommand { ids, force }),
            Commands::Categories => CommandEnum::Categories(CategoriesCommand),
            Commands::CategoryAdd { name, icon } => {
                CommandEnum::CategoryAdd(CategoryAddCommand { name, icon })
            }
            Commands::CategoryDelete { id, force } => {
                CommandEnum::CategoryDelete(CategoryDeleteCommand { id, force })
            }
            Commands::Password { new_password } => {
                CommandEnum::Password(PasswordCommand { new_password })
            }
            Commands::Export { path } => CommandEnum::Export(ExportCommand { path }),
            Commands::Import { file, force } => CommandEnum::Import(ImportCommand { file, force }),
            Commands::Meta { url } => CommandEnum::Meta(MetaCommand { url }),
            Commands::Open { ids } => CommandEnum::Open(OpenCommand { ids }),
            Commands::Shell => CommandEnum::Shell(ShellCommand),
        }
    }
}

/// Local data file when `--data` is given, the HTTP API otherwise
pub fn connect(cli: &Cli, config: &Config) -> Result<Box<dyn Backend>> {
    match &cli.data {
        Some(path) => {
            log::debug!("Using local data file {}", path.display());
            Ok(Box::new(StoreBackend::new(JsonStore::open(path))))
        }
        None => {
            let base = cli.api.as_deref().unwrap_or(config.api_base());
            log::debug!("Using API at {}", base);
            Ok(Box::new(ApiClient::new(base)?))
        }
    }
}

pub fn handle_args(cli: Cli, config: &Config) -> Result<()> {
    let backend = connect(&cli, config)?;
    let no_color = cli.nc || !std::io::stdout().is_terminal();
    let ctx = AppContext {
        backend: backend.as_ref(),
        config,
        password: cli.password.as_deref(),
        format: cli
            .format
            .as_deref()
            .map(OutputFormat::from_string)
            .unwrap_or(OutputFormat::Colored),
        no_color,
    };

    let command = match cli.command {
        Some(command) => command.into_command(),
        // bare keywords search, nothing lists everything
        None => CommandEnum::List(ListCommand {
            query: (!cli.keywords.is_empty()).then(|| cli.keywords.join(" ")),
            category: None,
        }),
    };
    command.execute(&ctx)
}
