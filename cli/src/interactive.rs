use crate::commands::category::parse_icon;
use crate::commands::{AppContext, Session};
use crate::fetch_ui::autofill_with_spinner;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tiosa::browser;
use tiosa::controller::{BookmarkDraft, DropSide};
use tiosa::error::{Result, TiosaError};
use tiosa::metadata;
use tiosa::models::ALL_CATEGORY;

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Help,
    Quit,
    List,
    Search(String),
    Category(String),
    Categories,
    Login,
    Logout,
    Add(String),
    Edit(String),
    Delete(String),
    Move { id: String, target: Option<(String, DropSide)> },
    CategoryAdd { name: String, icon: String },
    CategoryDelete(String),
    Password,
    Export(PathBuf),
    Import(PathBuf),
    Open(String),
}

fn usage(text: &str) -> TiosaError {
    TiosaError::BadRequest(format!("usage: {}", text))
}

pub fn parse_line(line: &str) -> Result<Action> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = parts.split_first() else {
        return Err(usage("? for help"));
    };
    let rest = args.join(" ");

    let action = match cmd {
        "?" | "help" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        "ls" | "list" => Action::List,
        "s" | "search" => Action::Search(rest),
        "c" | "cat" if args.is_empty() => Action::Category(ALL_CATEGORY.to_string()),
        "c" => Action::Category(rest),
        "cat" => match args {
            ["add", name @ .., icon] if !name.is_empty() && parse_icon(icon).is_ok() => {
                Action::CategoryAdd {
                    name: name.join(" "),
                    icon: icon.to_string(),
                }
            }
            ["add", name @ ..] if !name.is_empty() => Action::CategoryAdd {
                name: name.join(" "),
                icon: "Circle".to_string(),
            },
            ["rm", id] => Action::CategoryDelete(id.to_string()),
            [id] if *id != "add" && *id != "rm" => Action::Category(id.to_string()),
            _ => return Err(usage("cat [id] | cat add <name> [icon] | cat rm <id>")),
        },
        "cats" => Action::Categories,
        "login" => Action::Login,
        "logout" => Action::Logout,
        "a" | "add" => match args {
            [url] => Action::Add(url.to_string()),
            _ => return Err(usage("a <url>")),
        },
        "e" | "edit" => match args {
            [id] => Action::Edit(id.to_string()),
            _ => return Err(usage("e <id>")),
        },
        "d" | "delete" => match args {
            [id] => Action::Delete(id.to_string()),
            _ => return Err(usage("d <id>")),
        },
        "mv" => match args {
            [id, "end"] => Action::Move {
                id: id.to_string(),
                target: None,
            },
            [id, side, target] => {
                let side = match *side {
                    "before" => DropSide::Before,
                    "after" => DropSide::After,
                    _ => return Err(usage("mv <id> before|after <target> | mv <id> end")),
                };
                Action::Move {
                    id: id.to_string(),
                    target: Some((target.to_string(), side)),
                }
            }
            _ => return Err(usage("mv <id> before|after <target> | mv <id> end")),
        },
        "passwd" => Action::Password,
        "export" => Action::Export(PathBuf::from(if rest.is_empty() { "." } else { rest.as_str() })),
        "import" if !rest.is_empty() => Action::Import(PathBuf::from(rest)),
        "import" => return Err(usage("import <file>")),
        "o" | "open" => match args {
            [id] => Action::Open(id.to_string()),
            _ => return Err(usage("o <id>")),
        },
        id if id.chars().all(|c| c.is_ascii_digit()) && args.is_empty() => {
            Action::Open(id.to_string())
        }
        other => {
            return Err(TiosaError::BadRequest(format!(
                "unknown command {:?} (? for help)",
                other
            )))
        }
    };
    Ok(action)
}

pub fn run_with_context(ctx: &AppContext) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| TiosaError::Other(e.to_string()))?;
    let mut ctl = ctx.session();

    println!("tiosa interactive mode - type '?' for help");

    loop {
        let prompt = if ctl.is_admin() { "tiosa#> " } else { "tiosa> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)
                    .map_err(|e| TiosaError::Other(e.to_string()))?;

                match parse_line(line) {
                    Ok(Action::Quit) => break,
                    Ok(action) => {
                        if let Err(e) = handle_action(ctx, &mut ctl, &mut rl, action) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "
BROWSE:
    ls                     List bookmarks under the current search and category
    s [query]              Search title, description and tags (empty clears)
    c [id]                 Switch category (no id: all)
    cats                   List categories with counts
    o <id>  or  <id>       Open bookmark in browser

SESSION:
    login                  Enter admin mode (password prompt)
    logout                 Leave admin mode

ADMIN:
    a <url>                Add bookmark (AI autofill, then edit the form)
    e <id>                 Edit bookmark
    d <id>                 Delete bookmark
    mv <id> before <id>    Reorder locally (also: after <id>, end)
    cat add <name> [icon]  Add category (Circle, Code, Palette, Cpu, Globe, Zap)
    cat rm <id>            Delete category; its bookmarks move to all
    passwd                 Change admin password
    export [path]          Export everything to a file or directory
    import <file>          Replace everything from an export file

    ?  or help             Show this help
    q  or quit or exit     Exit interactive mode

NOTE: mv only changes the order in this session; it is not saved.
"
    );
}

fn handle_action(
    ctx: &AppContext,
    ctl: &mut Session,
    rl: &mut DefaultEditor,
    action: Action,
) -> Result<()> {
    match action {
        Action::Help => print_help(),
        Action::Quit => {}
        Action::List => {
            let visible = ctl.visible_bookmarks();
            ctx.format
                .print_bookmarks(&visible, ctl.categories(), ctx.no_color);
        }
        Action::Search(query) => {
            ctl.set_search_query(&query);
            eprintln!("{} match(es)", ctl.visible_bookmarks().len());
        }
        Action::Category(id) => {
            crate::commands::require_category(ctl, &id)?;
            ctl.set_active_category(&id);
            eprintln!(
                "{}: {} bookmark(s)",
                ctl.active_category_name(),
                ctl.visible_bookmarks().len()
            );
        }
        Action::Categories => {
            ctx.format
                .print_categories(ctl.categories(), ctl.bookmarks(), ctx.no_color);
        }
        Action::Login => {
            ctl.open_login();
            let password = rpassword::prompt_password("Admin password: ")?;
            if !ctl.login(&password) {
                if let Some(e) = ctl.login_error() {
                    eprintln!("{}", e);
                }
                ctl.close_login();
            }
        }
        Action::Logout => ctl.logout(),
        Action::Add(url) => {
            ctl.new_bookmark()?;
            let mut draft = ctl.draft();
            draft.url = url;
            let provider = metadata::provider_from_config(&ctx.config.metadata);
            autofill_with_spinner(ctl, &mut draft, provider.as_ref());
            submit_form(ctl, rl, draft)?;
        }
        Action::Edit(id) => {
            ctl.edit_bookmark(&id)?;
            let draft = ctl.draft();
            submit_form(ctl, rl, draft)?;
        }
        Action::Delete(id) => {
            let answer = read_field(rl, &format!("Delete bookmark {}? [y/N]: ", id), "")?;
            if answer.eq_ignore_ascii_case("y") {
                ctl.delete_bookmark(&id)?;
            }
        }
        Action::Move { id, target } => {
            ctl.start_drag(&id)?;
            let moved = match target {
                Some((target, side)) => ctl.drop_on_card(&target, side),
                None => ctl.drop_on_grid(),
            };
            if !moved {
                eprintln!("Order unchanged");
            }
        }
        Action::CategoryAdd { name, icon } => {
            let icon = parse_icon(&icon)?;
            ctl.add_category(&name, icon.name())?;
        }
        Action::CategoryDelete(id) => {
            ctl.delete_category(&id)?;
        }
        Action::Password => {
            ctl.open_settings()?;
            let password = rpassword::prompt_password("New admin password: ")?;
            let result = ctl.update_password(&password);
            if let Some(message) = ctl.feedback() {
                eprintln!("{}", message);
            }
            ctl.clear_feedback();
            ctl.close_admin_panel();
            result?;
        }
        Action::Export(path) => {
            let result = ctl.export_to(&path);
            if let Ok(path) = &result {
                eprintln!("Exported to {}", path.display());
            }
            report_feedback(ctl);
            result?;
        }
        Action::Import(path) => {
            let result = ctl.import_from(&path);
            report_feedback(ctl);
            result?;
        }
        Action::Open(id) => {
            let bookmark = ctl
                .bookmarks()
                .iter()
                .find(|b| b.id == id)
                .ok_or_else(|| TiosaError::NotFound(format!("bookmark {}", id)))?;
            eprintln!("Opening: {}", bookmark.url);
            browser::open_url(&bookmark.url)?;
        }
    }
    Ok(())
}

fn report_feedback(ctl: &mut Session) {
    if let Some(message) = ctl.feedback() {
        eprintln!("{}", message);
    }
    ctl.clear_feedback();
}

fn read_field(rl: &mut DefaultEditor, prompt: &str, initial: &str) -> Result<String> {
    rl.readline_with_initial(prompt, (initial, ""))
        .map(|s| s.trim().to_string())
        .map_err(|e| TiosaError::Other(e.to_string()))
}

/// Walk the edit form field by field, pre-filled with the draft
fn submit_form(ctl: &mut Session, rl: &mut DefaultEditor, mut draft: BookmarkDraft) -> Result<()> {
    let result = fill_form(rl, &mut draft).and_then(|_| {
        if !draft.category.is_empty() {
            crate::commands::require_category(ctl, &draft.category)?;
        }
        ctl.submit_draft(&draft)
    });
    if result.is_err() {
        ctl.close_admin_panel();
    }
    result
}

fn fill_form(rl: &mut DefaultEditor, draft: &mut BookmarkDraft) -> Result<()> {
    draft.url = read_field(rl, "URL: ", &draft.url)?;
    draft.title = read_field(rl, "Title: ", &draft.title)?;
    draft.description = read_field(rl, "Description: ", &draft.description)?;
    draft.category = read_field(rl, "Category: ", &draft.category)?;
    draft.tags = read_field(rl, "Tags (comma separated): ", &draft.tags)?;
    Ok(())
}
