use crate::format::OutputFormat;
use std::io::{self, Write};
use tiosa::client::Backend;
use tiosa::config::Config;
use tiosa::controller::{Controller, LOGIN_FAILED};
use tiosa::error::{Result, TiosaError};

pub type Session<'a> = Controller<&'a dyn Backend>;

pub struct AppContext<'a> {
    pub backend: &'a dyn Backend,
    pub config: &'a Config,
    /// Admin password from the command line; prompted for when absent
    pub password: Option<&'a str>,
    pub format: OutputFormat,
    pub no_color: bool,
}

impl<'a> AppContext<'a> {
    /// Controller synced with the backend. An unreachable backend leaves the
    /// built-in defaults in place.
    pub fn session(&self) -> Session<'a> {
        let mut ctl = Controller::new(self.backend);
        ctl.load();
        ctl
    }

    /// Synced controller already in admin mode
    pub fn admin_session(&self) -> Result<Session<'a>> {
        let mut ctl = self.session();
        let password = match self.password {
            Some(p) => p.to_string(),
            None => rpassword::prompt_password("Admin password: ")?,
        };
        if !ctl.login(&password) {
            let reason = ctl.login_error().unwrap_or(LOGIN_FAILED).to_string();
            return Err(TiosaError::Other(reason));
        }
        Ok(ctl)
    }
}

pub mod add;
pub mod category;
pub mod delete;
pub mod edit;
pub mod import_export;
pub mod list;
pub mod misc;
pub mod password;

pub trait TiosaCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn TiosaCommand>)
pub enum CommandEnum {
    Serve(misc::ServeCommand),
    List(list::ListCommand),
    Categories(list::CategoriesCommand),
    Add(add::AddCommand),
    Edit(edit::EditCommand),
    Delete(delete::DeleteCommand),
    CategoryAdd(category::CategoryAddCommand),
    CategoryDelete(category::CategoryDeleteCommand),
    Password(password::PasswordCommand),
    Export(import_export::ExportCommand),
    Import(import_export::ImportCommand),
    Meta(misc::MetaCommand),
    Open(misc::OpenCommand),
    Shell(misc::ShellCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Serve(cmd) => cmd.execute(ctx),
            Self::List(cmd) => cmd.execute(ctx),
            Self::Categories(cmd) => cmd.execute(ctx),
            Self::Add(cmd) => cmd.execute(ctx),
            Self::Edit(cmd) => cmd.execute(ctx),
            Self::Delete(cmd) => cmd.execute(ctx),
            Self::CategoryAdd(cmd) => cmd.execute(ctx),
            Self::CategoryDelete(cmd) => cmd.execute(ctx),
            Self::Password(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Meta(cmd) => cmd.execute(ctx),
            Self::Open(cmd) => cmd.execute(ctx),
            Self::Shell(cmd) => cmd.execute(ctx),
        }
    }
}

/// Fail unless `id` names an existing category
pub fn require_category(ctl: &Session, id: &str) -> Result<()> {
    if ctl.categories().iter().any(|c| c.id == id) {
        Ok(())
    } else {
        Err(TiosaError::NotFound(format!("unknown category: {}", id)))
    }
}

/// `[y/N]` prompt on stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
