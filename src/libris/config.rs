use crate::error::{LibrisError, Result};
use crate::library::{
    Library, DEFAULT_SEED_EMAIL, DEFAULT_SEED_NAME, DEFAULT_SEED_SECRET, DEFAULT_SEED_USERNAME,
};
use crate::model::Credentials;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BOOKS_FILE: &str = "books.txt";
const DEFAULT_USERS_FILE: &str = "users.txt";

/// The built-in librarian created at every start. Never written to the
/// users file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedAccount {
    pub name: String,
    pub email: String,
    pub username: String,
    pub secret: String,
}

impl Default for SeedAccount {
    fn default() -> Self {
        Self {
            name: DEFAULT_SEED_NAME.to_string(),
            email: DEFAULT_SEED_EMAIL.to_string(),
            username: DEFAULT_SEED_USERNAME.to_string(),
            secret: DEFAULT_SEED_SECRET.to_string(),
        }
    }
}

/// Configuration for libris, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    /// File holding one book per line
    #[serde(default = "default_books_file")]
    pub books_file: String,

    /// File holding one member or librarian per line
    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default)]
    pub seed: SeedAccount,
}

fn default_books_file() -> String {
    DEFAULT_BOOKS_FILE.to_string()
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            books_file: default_books_file(),
            users_file: default_users_file(),
            seed: SeedAccount::default(),
        }
    }
}

impl LibrisConfig {
    pub const KEYS: [&'static str; 2] = ["books-file", "users-file"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LibrisError::Io)?;
        let config: LibrisConfig =
            serde_json::from_str(&content).map_err(LibrisError::Serialization)?;
        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LibrisError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LibrisError::Serialization)?;
        fs::write(config_path, content).map_err(LibrisError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "books-file" => Ok(self.books_file.clone()),
            "users-file" => Ok(self.users_file.clone()),
            other => Err(LibrisError::Config(format!("Unknown config key: {}", other))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() || value.contains(['/', '\\']) {
            return Err(LibrisError::Config(format!(
                "{} must be a plain file name, got {:?}",
                key, value
            )));
        }
        let other_file = match key {
            "books-file" => &self.users_file,
            "users-file" => &self.books_file,
            other => return Err(LibrisError::Config(format!("Unknown config key: {}", other))),
        };
        if other_file == value {
            return Err(LibrisError::Config(
                "books-file and users-file must differ".to_string(),
            ));
        }
        match key {
            "books-file" => self.books_file = value.to_string(),
            _ => self.users_file = value.to_string(),
        }
        Ok(())
    }

    /// A fresh library seeded with this config's built-in librarian.
    pub fn new_library(&self) -> Library {
        Library::with_seed(
            self.seed.name.clone(),
            self.seed.email.clone(),
            Credentials::new(self.seed.username.clone(), self.seed.secret.clone()),
        )
    }
}
