use std::fmt;
use std::str::FromStr;

/// A catalog entry.
///
/// The issued flag is derived from `issued_to`, so a book can never claim to
/// be issued without naming its holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub issued_to: Option<u32>,
}

impl Book {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            issued_to: None,
        }
    }

    pub fn is_issued(&self) -> bool {
        self.issued_to.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_issued() {
            "Issued"
        } else {
            "Available"
        }
    }

    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
            SearchField::Isbn => &self.isbn,
        }
    }

    /// One-line summary used by listings and log lines.
    pub fn summary(&self) -> String {
        match self.issued_to {
            Some(holder) => format!(
                "#{} {} by {} [{}] issued to {}",
                self.id, self.title, self.author, self.isbn, holder
            ),
            None => format!(
                "#{} {} by {} [{}] available",
                self.id, self.title, self.author, self.isbn
            ),
        }
    }
}

/// Login material carried only by librarians.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Exact, case-sensitive comparison of both parts.
    pub fn matches(&self, username: &str, secret: &str) -> bool {
        self.username == username && self.secret == secret
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Member,
    Librarian(Credentials),
}

impl Role {
    pub fn librarian(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Role::Librarian(Credentials::new(username, secret))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Librarian(_) => "Librarian",
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            Role::Member => None,
            Role::Librarian(creds) => Some(creds),
        }
    }
}

/// A registered user of the library, member or librarian.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// Ids of books currently held, in issue order. Never contains duplicates.
    pub issued_books: Vec<u32>,
    pub role: Role,
}

impl Person {
    pub fn new(id: u32, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            issued_books: Vec::new(),
            role,
        }
    }

    pub fn is_librarian(&self) -> bool {
        matches!(self.role, Role::Librarian(_))
    }

    pub fn holds(&self, book_id: u32) -> bool {
        self.issued_books.contains(&book_id)
    }

    pub(crate) fn push_issued(&mut self, book_id: u32) {
        if !self.holds(book_id) {
            self.issued_books.push(book_id);
        }
    }

    pub(crate) fn remove_issued(&mut self, book_id: u32) -> bool {
        let before = self.issued_books.len();
        self.issued_books.retain(|id| *id != book_id);
        before != self.issued_books.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "#{} {} <{}> {} ({} book(s))",
            self.id,
            self.name,
            self.email,
            self.role.label(),
            self.issued_books.len()
        )
    }
}

/// Which book field a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Isbn,
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Author => write!(f, "author"),
            SearchField::Isbn => write!(f, "isbn"),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "isbn" => Ok(SearchField::Isbn),
            other => Err(format!(
                "Invalid search field: {} (expected title, author or isbn)",
                other
            )),
        }
    }
}

/// Replacement values for a book. `None` and empty strings both mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl BookUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub(crate) fn apply(&self, book: &mut Book) -> bool {
        let mut changed = false;
        for (slot, value) in [
            (&mut book.title, &self.title),
            (&mut book.author, &self.author),
            (&mut book.isbn, &self.isbn),
        ] {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                *slot = v.to_string();
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_flag_follows_holder() {
        let mut book = Book::new(1, "Dune", "Herbert", "001");
        assert!(!book.is_issued());
        assert_eq!(book.status_label(), "Available");
        book.issued_to = Some(4);
        assert!(book.is_issued());
        assert!(book.summary().contains("issued to 4"));
    }

    #[test]
    fn role_labels_differ_in_summary() {
        let member = Person::new(1, "Alice", "a@x.com", Role::Member);
        let admin = Person::new(2, "Bob", "b@x.com", Role::librarian("bob", "pw"));
        assert!(member.summary().contains("Member"));
        assert!(admin.summary().contains("Librarian"));
        assert!(member.role.credentials().is_none());
        assert_eq!(admin.role.credentials().unwrap().username, "bob");
    }

    #[test]
    fn credentials_are_case_sensitive() {
        let creds = Credentials::new("admin", "Secret");
        assert!(creds.matches("admin", "Secret"));
        assert!(!creds.matches("Admin", "Secret"));
        assert!(!creds.matches("admin", "secret"));
    }

    #[test]
    fn push_issued_ignores_duplicates() {
        let mut p = Person::new(1, "Alice", "a@x.com", Role::Member);
        p.push_issued(3);
        p.push_issued(3);
        p.push_issued(5);
        assert_eq!(p.issued_books, vec![3, 5]);
        assert!(p.remove_issued(3));
        assert!(!p.remove_issued(3));
        assert_eq!(p.issued_books, vec![5]);
    }

    #[test]
    fn update_skips_missing_and_empty_values() {
        let mut book = Book::new(1, "Dune", "Herbert", "001");
        let changed = BookUpdate::new().title("").author("Frank Herbert").apply(&mut book);
        assert!(changed);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.isbn, "001");
        assert!(!BookUpdate::new().apply(&mut book));
    }

    #[test]
    fn search_field_parses() {
        assert_eq!("isbn".parse::<SearchField>(), Ok(SearchField::Isbn));
        assert!("Title".parse::<SearchField>().is_err());
        assert_eq!(SearchField::Author.to_string(), "author");
    }
}
