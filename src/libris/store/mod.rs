//! # Storage Layer
//!
//! This module defines the storage abstraction for libris. The [`DataStore`]
//! trait moves whole collections of encoded record lines in and out of durable
//! storage; it knows nothing about books or persons. Decoding, validation and
//! the seed-account policy live in [`crate::gateway`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One text file per collection, one record per line
//!   - Writes replace the whole file (temp file, then rename)
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── books.txt     # one book line per record
//! ├── users.txt     # one member/librarian line per record
//! └── config.json   # optional, see config.rs
//! ```

use crate::error::Result;
use std::fmt;

pub mod fs;
pub mod memory;

/// The two record collections that are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Users,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Books => write!(f, "books"),
            Collection::Users => write!(f, "users"),
        }
    }
}

/// Abstract interface for line storage.
pub trait DataStore {
    /// Read every line of a collection, without terminators. A collection that was
    /// never written reads as empty.
    fn read_lines(&self, collection: Collection) -> Result<Vec<String>>;

    /// Replace the collection with `lines`, in order.
    fn write_lines(&mut self, collection: Collection, lines: &[String]) -> Result<()>;
}
