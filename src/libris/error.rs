use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Book not found: {0}")]
    BookNotFound(u32),

    #[error("User not found: {0}")]
    PersonNotFound(u32),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Decode error: {reason} (line: {line:?})")]
    Decode { line: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),
}

impl LibrisError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        LibrisError::InvalidState(msg.into())
    }

    pub fn decode(line: &str, reason: impl Into<String>) -> Self {
        LibrisError::Decode {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the "referenced record does not exist" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LibrisError::BookNotFound(_) | LibrisError::PersonNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LibrisError>;
