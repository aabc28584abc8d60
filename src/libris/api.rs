//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every libris operation, whatever UI sits on top.
//!
//! ## Lifetime
//!
//! A `LibrisApi` is scoped explicitly: [`LibrisApi::open`] builds the library
//! and loads it from the store, callers run operations, then call
//! [`LibrisApi::save`]. Nothing is written implicitly when the value drops.
//!
//! ## Generic Over DataStore
//!
//! `LibrisApi<S: DataStore>` is generic over the storage backend:
//! - Production: `LibrisApi<FileStore>`
//! - Testing: `LibrisApi<InMemoryStore>`
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `library.rs` and `commands/*.rs`
//! - **I/O to the terminal**: Returns `CmdResult`s, never prints
//! - **Authorization policy**: `require_librarian` is offered, the caller
//!   decides which operations need it

use crate::commands;
use crate::error::Result;
use crate::gateway::{self, LoadReport, SaveReport};
use crate::library::Library;
use crate::model::{BookUpdate, Role, SearchField};
use crate::store::DataStore;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LibrisPaths {
    pub data_dir: PathBuf,
}

pub struct LibrisApi<S: DataStore> {
    store: S,
    library: Library,
    paths: LibrisPaths,
    load_report: LoadReport,
}

impl<S: DataStore> LibrisApi<S> {
    /// Load `library` (normally empty apart from its seed) from `store`.
    pub fn open(store: S, mut library: Library, paths: LibrisPaths) -> Result<Self> {
        let load_report = gateway::load_all(&store, &mut library)?;
        Ok(Self {
            store,
            library,
            paths,
            load_report,
        })
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn save(&mut self) -> Result<SaveReport> {
        gateway::save_all(&mut self.store, &self.library)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn paths(&self) -> &LibrisPaths {
        &self.paths
    }

    // --- Books ---

    pub fn add_book(
        &mut self,
        id: Option<u32>,
        title: String,
        author: String,
        isbn: String,
    ) -> Result<commands::CmdResult> {
        commands::books::add(&mut self.library, id, title, author, isbn)
    }

    pub fn list_books(&self, available_only: bool) -> Result<commands::CmdResult> {
        commands::books::list(&self.library, available_only)
    }

    pub fn view_book(&self, id: u32) -> Result<commands::CmdResult> {
        commands::books::view(&self.library, id)
    }

    pub fn update_book(&mut self, id: u32, update: &BookUpdate) -> Result<commands::CmdResult> {
        commands::books::update(&mut self.library, id, update)
    }

    pub fn delete_book(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::books::delete(&mut self.library, id)
    }

    pub fn search_books(&self, field: SearchField, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.library, field, query)
    }

    // --- Loans ---

    pub fn issue_book(&mut self, book_id: u32, person_id: u32) -> Result<commands::CmdResult> {
        commands::loans::issue(&mut self.library, book_id, person_id)
    }

    pub fn return_book(&mut self, book_id: u32) -> Result<commands::CmdResult> {
        commands::loans::return_book(&mut self.library, book_id)
    }

    pub fn books_held_by(&self, person_id: u32) -> Result<commands::CmdResult> {
        commands::loans::held_by(&self.library, person_id)
    }

    // --- Users ---

    pub fn add_user(
        &mut self,
        name: String,
        email: String,
        role: Role,
    ) -> Result<commands::CmdResult> {
        commands::users::add(&mut self.library, name, email, role)
    }

    pub fn list_users(&self) -> Result<commands::CmdResult> {
        commands::users::list(&self.library)
    }

    pub fn view_user(&self, id: u32) -> Result<commands::CmdResult> {
        commands::users::view(&self.library, id)
    }

    // --- Session ---

    pub fn login(&mut self, username: &str, secret: &str) -> Result<commands::CmdResult> {
        commands::session::login(&mut self.library, username, secret)
    }

    pub fn logout(&mut self) -> Result<commands::CmdResult> {
        commands::session::logout(&mut self.library)
    }

    pub fn whoami(&self) -> Result<commands::CmdResult> {
        commands::session::whoami(&self.library)
    }

    pub fn require_librarian(&self) -> Result<()> {
        commands::session::require_librarian(&self.library)
    }

    // --- Maintenance ---

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.library)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths.data_dir, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
