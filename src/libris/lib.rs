//! # Libris Architecture
//!
//! Libris is a **UI-agnostic library catalog**: books, members, librarians and
//! the loans between them, kept in plain text files. The binary is one client
//! of the library crate, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, logs in, renders tables and messages   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - open (load) → operations → save                          │
//! │  - Returns structured `CmdResult`s                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Library (library.rs)       │
//! │  - Library enforces every record invariant                  │
//! │  - Commands turn outcomes into messages                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (gateway.rs, codec.rs, store/)                 │
//! │  - Line codec, bulk load/save, DataStore trait              │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns
//! `Result<CmdResult>` or model types, never prints and never exits. Logging
//! goes through the `log` facade; the binary decides where it ends up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Per-operation wrappers producing `CmdResult`
//! - [`library`]: In-memory record store and its consistency rules
//! - [`index`]: id → position lookups
//! - [`model`]: `Book`, `Person`, `Role` and friends
//! - [`codec`]: One-line text encoding of records
//! - [`gateway`]: Bulk load/save through a store
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod index;
pub mod library;
pub mod model;
pub mod store;
