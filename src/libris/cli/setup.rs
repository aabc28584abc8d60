use clap::{Parser, Subcommand};
use libris::model::SearchField;

#[derive(Parser, Debug)]
#[command(name = "libris", bin_name = "libris", version)]
#[command(about = "Library catalog and membership tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Librarian username, needed for commands that change data
    #[arg(short, long, global = true, env = "LIBRIS_USER")]
    pub user: Option<String>,

    /// Librarian password
    #[arg(
        short,
        long,
        global = true,
        env = "LIBRIS_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books in catalog order
    #[command(alias = "ls")]
    Books {
        /// Only books that are not issued
        #[arg(short, long)]
        available: bool,
    },

    /// Show one book
    Book { id: u32 },

    /// Search books by title, author or isbn (case-sensitive substring)
    Search {
        /// Field to search: title, author or isbn
        field: SearchField,

        /// Text to look for; an empty string matches every book
        query: String,
    },

    /// List registered users
    Users,

    /// Show one user and the books they hold
    User { id: u32 },

    /// Add a book to the catalog
    #[command(alias = "add")]
    AddBook {
        title: String,
        author: String,
        isbn: String,

        /// Use this id instead of the next free one
        #[arg(long)]
        id: Option<u32>,
    },

    /// Change a book's title, author or isbn
    UpdateBook {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        isbn: Option<String>,
    },

    /// Remove a book that is not issued
    #[command(alias = "rm")]
    DeleteBook { id: u32 },

    /// Issue a book to a user
    Issue { book: u32, user: u32 },

    /// Return an issued book
    Return { book: u32 },

    /// Register a member or librarian
    AddUser {
        name: String,
        email: String,

        /// Register a librarian (requires --username and --secret)
        #[arg(long, requires_all = ["username", "secret"])]
        librarian: bool,

        #[arg(long, requires = "librarian")]
        username: Option<String>,

        #[arg(long, requires = "librarian")]
        secret: Option<String>,
    },

    /// Check and repair loan cross references
    Doctor,

    /// Get or set configuration
    Config {
        /// Configuration key (books-file, users-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Show the logged in librarian
    Whoami,
}

impl Commands {
    /// True for commands that change stored data.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Commands::AddBook { .. }
                | Commands::UpdateBook { .. }
                | Commands::DeleteBook { .. }
                | Commands::Issue { .. }
                | Commands::Return { .. }
                | Commands::AddUser { .. }
                | Commands::Doctor
        )
    }
}
