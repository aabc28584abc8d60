use crate::config::LibrisConfig;
use crate::library::DoctorReport;
use crate::model::{Book, Person};

pub mod books;
pub mod config;
pub mod doctor;
pub mod loans;
pub mod search;
pub mod session;
pub mod users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub listed_persons: Vec<Person>,
    pub config: Option<LibrisConfig>,
    pub doctor: Option<DoctorReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_listed_persons(mut self, persons: Vec<Person>) -> Self {
        self.listed_persons = persons;
        self
    }

    pub fn with_config(mut self, config: LibrisConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
