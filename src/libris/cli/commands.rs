//! # CLI Layer
//!
//! This module is **one possible UI client** for libris. It is the only place
//! that knows about the terminal: argument parsing, logging setup, colored
//! output and exit codes.
//!
//! ## Flow
//!
//! 1. Parse arguments with clap
//! 2. Set up logging (`--verbose` or `RUST_LOG`)
//! 3. Build the `AppContext`: data dir, config, `FileStore`, loaded `LibrisApi`
//! 4. Log in for commands that change data (and `whoami`); read-only
//!    commands ignore credentials
//! 5. Dispatch to a `handle_*` function, print its `CmdResult`
//! 6. Save after commands that change data
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::render::{
    print_messages, render_book_detail, render_book_table, render_person_detail,
    render_person_table, render_text_list,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use libris::api::{ConfigAction, LibrisApi, LibrisPaths};
use libris::config::LibrisConfig;
use libris::error::{LibrisError, Result};
use libris::model::{BookUpdate, Role, SearchField};
use libris::store::fs::FileStore;
use std::path::PathBuf;

/// Overrides the platform data directory.
const HOME_ENV: &str = "LIBRIS_HOME";

struct AppContext {
    api: LibrisApi<FileStore>,
}

pub fn run() -> Result<()> {
    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    let command = cli
        .command
        .take()
        .unwrap_or(Commands::Books { available: false });
    let mutating = command.is_mutating();
    if mutating || matches!(command, Commands::Whoami) {
        login(&mut ctx, &cli)?;
    } else if cli.user.is_some() || cli.password.is_some() {
        log::debug!("read-only command, credentials ignored");
    }
    if mutating {
        ctx.api.require_librarian()?;
    }

    let outcome = match command {
        Commands::Books { available } => handle_books(&ctx, available),
        Commands::Book { id } => handle_book(&ctx, id),
        Commands::Search { field, query } => handle_search(&ctx, field, &query),
        Commands::Users => handle_users(&ctx),
        Commands::User { id } => handle_user(&ctx, id),
        Commands::AddBook {
            title,
            author,
            isbn,
            id,
        } => handle_add_book(&mut ctx, id, title, author, isbn),
        Commands::UpdateBook {
            id,
            title,
            author,
            isbn,
        } => handle_update_book(&mut ctx, id, title, author, isbn),
        Commands::DeleteBook { id } => handle_delete_book(&mut ctx, id),
        Commands::Issue { book, user } => handle_issue(&mut ctx, book, user),
        Commands::Return { book } => handle_return(&mut ctx, book),
        Commands::AddUser {
            name,
            email,
            librarian,
            username,
            secret,
        } => handle_add_user(&mut ctx, name, email, librarian, username, secret),
        Commands::Doctor => handle_doctor(&mut ctx),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Whoami => handle_whoami(&ctx),
    };
    outcome?;

    if mutating {
        let report = ctx.api.save()?;
        log::debug!(
            "saved {} book(s) and {} user(s)",
            report.books_saved,
            report.users_saved
        );
    }
    Ok(())
}

/// Warnings only by default, debug with `--verbose`. `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let data_dir = resolve_data_dir()?;
    let config = LibrisConfig::load(&data_dir)?;
    log::debug!("using data dir {}", data_dir.display());

    let store = FileStore::new(data_dir.clone()).with_config(&config);
    let paths = LibrisPaths { data_dir };
    let api = LibrisApi::open(store, config.new_library(), paths)?;

    let skipped = api.load_report().skipped.len();
    if skipped > 0 {
        log::warn!("{} stored line(s) could not be loaded", skipped);
    }
    Ok(AppContext { api })
}

fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "libris", "libris")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            LibrisError::Config(format!(
                "could not determine a data directory, set {}",
                HOME_ENV
            ))
        })
}

fn login(ctx: &mut AppContext, cli: &Cli) -> Result<()> {
    match (&cli.user, &cli.password) {
        (Some(user), Some(password)) => ctx.api.login(user, password).map(|_| ()),
        (Some(_), None) => Err(LibrisError::Unauthorized(
            "--user given without --password".to_string(),
        )),
        (None, Some(_)) => Err(LibrisError::Unauthorized(
            "--password given without --user".to_string(),
        )),
        (None, None) => Ok(()),
    }
}

fn handle_books(ctx: &AppContext, available: bool) -> Result<()> {
    let result = ctx.api.list_books(available)?;
    print!("{}", render_book_table(&result.listed_books));
    print_messages(&result.messages);
    Ok(())
}

fn handle_book(ctx: &AppContext, id: u32) -> Result<()> {
    let result = ctx.api.view_book(id)?;
    for book in &result.listed_books {
        print!("{}", render_book_detail(book));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, field: SearchField, query: &str) -> Result<()> {
    let result = ctx.api.search_books(field, query)?;
    if !result.listed_books.is_empty() {
        print!("{}", render_book_table(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_users(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_users()?;
    print!("{}", render_person_table(&result.listed_persons));
    print_messages(&result.messages);
    Ok(())
}

fn handle_user(ctx: &AppContext, id: u32) -> Result<()> {
    let result = ctx.api.view_user(id)?;
    for person in &result.listed_persons {
        print!("{}", render_person_detail(person));
    }
    if result.listed_books.is_empty() {
        println!("No books issued.");
    } else {
        print!("{}", render_book_table(&result.listed_books));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add_book(
    ctx: &mut AppContext,
    id: Option<u32>,
    title: String,
    author: String,
    isbn: String,
) -> Result<()> {
    let result = ctx.api.add_book(id, title, author, isbn)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update_book(
    ctx: &mut AppContext,
    id: u32,
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
) -> Result<()> {
    let mut update = BookUpdate::new();
    if let Some(title) = title {
        update = update.title(title);
    }
    if let Some(author) = author {
        update = update.author(author);
    }
    if let Some(isbn) = isbn {
        update = update.isbn(isbn);
    }

    let result = ctx.api.update_book(id, &update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_book(ctx: &mut AppContext, id: u32) -> Result<()> {
    let result = ctx.api.delete_book(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_issue(ctx: &mut AppContext, book: u32, user: u32) -> Result<()> {
    let result = ctx.api.issue_book(book, user)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_return(ctx: &mut AppContext, book: u32) -> Result<()> {
    let result = ctx.api.return_book(book)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add_user(
    ctx: &mut AppContext,
    name: String,
    email: String,
    librarian: bool,
    username: Option<String>,
    secret: Option<String>,
) -> Result<()> {
    let role = match (librarian, username, secret) {
        (false, _, _) => Role::Member,
        (true, Some(username), Some(secret)) => Role::librarian(username, secret),
        (true, _, _) => {
            return Err(LibrisError::invalid_state(
                "a librarian needs --username and --secret",
            ))
        }
    };

    let result = ctx.api.add_user(name, email, role)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            let mut lines = Vec::new();
            for key in LibrisConfig::KEYS {
                lines.push(format!("{} = {}", key, config.get(key)?));
            }
            print!("{}", render_text_list(&lines, "No configuration values."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    for person in &result.listed_persons {
        print!("{}", render_person_detail(person));
    }
    print_messages(&result.messages);
    Ok(())
}
