//! # In-Memory Record Store
//!
//! [`Library`] owns every book and person, the two [`IdIndex`]es over them,
//! the id counters and the login session. It is the only place that mutates
//! records, and each public operation leaves the following true on return:
//!
//! - `book_index` / `person_index` map exactly the ids in `books` / `persons`
//!   to their positions.
//! - A book has `issued_to == Some(p)` iff person `p` lists the book in
//!   `issued_books` (the holder may be missing after a bad load, see
//!   [`Library::doctor`]).
//! - Every id handed out is below `next_book_id` / `next_user_id`.
//!
//! Operations validate everything they need before mutating anything, so a
//! failed call leaves the library untouched.
//!
//! The seed librarian (id 0) is created with the library and is never
//! persisted; see `gateway`.

use crate::error::{LibrisError, Result};
use crate::index::IdIndex;
use crate::model::{Book, BookUpdate, Credentials, Person, Role, SearchField};

pub const SEED_ID: u32 = 0;
pub const DEFAULT_SEED_NAME: &str = "System Admin";
pub const DEFAULT_SEED_EMAIL: &str = "admin@library.com";
pub const DEFAULT_SEED_USERNAME: &str = "admin";
pub const DEFAULT_SEED_SECRET: &str = "admin123";

/// Records are stored one per line, so no text field may contain a line break.
fn check_single_line(what: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(LibrisError::invalid_state(format!(
            "{} must not contain line breaks",
            what
        )));
    }
    Ok(())
}

/// Outcome of a cross-reference repair pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    /// List entries naming a book that does not exist.
    pub removed_missing_books: usize,
    /// List entries naming a book that is issued to someone else, or not at all.
    pub removed_stale_entries: usize,
    /// Issued books added back to their holder's list.
    pub relinked_books: usize,
    /// Issued books whose holder does not exist. Left issued.
    pub dangling_books: Vec<u32>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.removed_missing_books == 0
            && self.removed_stale_entries == 0
            && self.relinked_books == 0
            && self.dangling_books.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Library {
    books: Vec<Book>,
    persons: Vec<Person>,
    book_index: IdIndex,
    person_index: IdIndex,
    next_book_id: u32,
    next_user_id: u32,
    session: Option<u32>,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// A library holding only the default seed librarian.
    pub fn new() -> Self {
        Self::with_seed(
            DEFAULT_SEED_NAME,
            DEFAULT_SEED_EMAIL,
            Credentials::new(DEFAULT_SEED_USERNAME, DEFAULT_SEED_SECRET),
        )
    }

    pub fn with_seed(
        name: impl Into<String>,
        email: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        let seed = Person::new(SEED_ID, name, email, Role::Librarian(credentials));
        let persons = vec![seed];
        let person_index = IdIndex::build(&persons, |p| p.id);
        Self {
            books: Vec::new(),
            persons,
            book_index: IdIndex::new(),
            person_index,
            next_book_id: 1,
            next_user_id: 1,
            session: None,
        }
    }

    // --- Books ---

    /// Add a book. Without an explicit id the next free id is used; with one,
    /// the counter moves past it.
    pub fn add_book(
        &mut self,
        id: Option<u32>,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<&Book> {
        let id = match id {
            Some(0) => return Err(LibrisError::invalid_state("book id must be positive")),
            Some(id) if self.book_index.contains(id) => {
                return Err(LibrisError::invalid_state(format!(
                    "book id {} already exists",
                    id
                )))
            }
            Some(id) => id,
            None => self.next_book_id,
        };
        let next = id
            .checked_add(1)
            .ok_or_else(|| LibrisError::invalid_state("book id space exhausted"))?;

        let book = Book::new(id, title, author, isbn);
        check_single_line("title", &book.title)?;
        check_single_line("author", &book.author)?;
        check_single_line("isbn", &book.isbn)?;
        log::debug!("adding book {}", book.summary());
        self.books.push(book);
        self.book_index.insert(id, self.books.len() - 1);
        self.next_book_id = self.next_book_id.max(next);
        Ok(&self.books[self.books.len() - 1])
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get_book(&self, id: u32) -> Result<&Book> {
        self.book_index
            .get(id)
            .map(|pos| &self.books[pos])
            .ok_or(LibrisError::BookNotFound(id))
    }

    pub fn available_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.is_issued()).collect()
    }

    /// Case-sensitive substring match on one field, in collection order.
    /// An empty query matches every book.
    pub fn search_books(&self, query: &str, field: SearchField) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.field(field).contains(query))
            .collect()
    }

    /// Replace any subset of title/author/isbn. Returns the updated book.
    pub fn update_book(&mut self, id: u32, update: &BookUpdate) -> Result<&Book> {
        let pos = self
            .book_index
            .get(id)
            .ok_or(LibrisError::BookNotFound(id))?;
        for (what, value) in [
            ("title", &update.title),
            ("author", &update.author),
            ("isbn", &update.isbn),
        ] {
            if let Some(value) = value {
                check_single_line(what, value)?;
            }
        }
        if update.apply(&mut self.books[pos]) {
            log::debug!("updated book {}", self.books[pos].summary());
        }
        Ok(&self.books[pos])
    }

    /// Remove a book that is not issued. Returns the removed record.
    pub fn delete_book(&mut self, id: u32) -> Result<Book> {
        let pos = self
            .book_index
            .get(id)
            .ok_or(LibrisError::BookNotFound(id))?;
        if self.books[pos].is_issued() {
            return Err(LibrisError::invalid_state(format!(
                "book {} is issued and cannot be deleted",
                id
            )));
        }

        let removed = self.books.remove(pos);
        self.book_index.rebuild(&self.books, |b| b.id);
        log::debug!("deleted book {}", removed.summary());
        Ok(removed)
    }

    // --- Loans ---

    pub fn issue_book(&mut self, book_id: u32, person_id: u32) -> Result<()> {
        let book_pos = self
            .book_index
            .get(book_id)
            .ok_or(LibrisError::BookNotFound(book_id))?;
        let person_pos = self
            .person_index
            .get(person_id)
            .ok_or(LibrisError::PersonNotFound(person_id))?;
        if let Some(holder) = self.books[book_pos].issued_to {
            return Err(LibrisError::invalid_state(format!(
                "book {} is already issued to {}",
                book_id, holder
            )));
        }

        self.books[book_pos].issued_to = Some(person_id);
        self.persons[person_pos].push_issued(book_id);
        log::debug!("issued book {} to {}", book_id, person_id);
        Ok(())
    }

    /// Clear a loan. Returns the id of the former holder. A holder missing
    /// from the library is tolerated: the book is still returned.
    pub fn return_book(&mut self, book_id: u32) -> Result<u32> {
        let book_pos = self
            .book_index
            .get(book_id)
            .ok_or(LibrisError::BookNotFound(book_id))?;
        let holder = self.books[book_pos].issued_to.ok_or_else(|| {
            LibrisError::invalid_state(format!("book {} is not currently issued", book_id))
        })?;

        match self.person_index.get(holder) {
            Some(pos) => {
                self.persons[pos].remove_issued(book_id);
            }
            None => log::warn!(
                "book {} was issued to unknown user {}, clearing loan only",
                book_id,
                holder
            ),
        }
        self.books[book_pos].issued_to = None;
        log::debug!("returned book {} from {}", book_id, holder);
        Ok(holder)
    }

    // --- Persons ---

    /// Register a person under the next user id.
    pub fn add_person(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<&Person> {
        let id = self.next_user_id;
        let next = id
            .checked_add(1)
            .ok_or_else(|| LibrisError::invalid_state("user id space exhausted"))?;

        let person = Person::new(id, name, email, role);
        check_single_line("name", &person.name)?;
        check_single_line("email", &person.email)?;
        if let Some(credentials) = person.role.credentials() {
            check_single_line("username", &credentials.username)?;
            check_single_line("secret", &credentials.secret)?;
        }

        log::debug!("adding user {}", person.summary());
        self.next_user_id = next;
        self.persons.push(person);
        self.person_index.insert(id, self.persons.len() - 1);
        Ok(&self.persons[self.persons.len() - 1])
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn get_person(&self, id: u32) -> Result<&Person> {
        self.person_index
            .get(id)
            .map(|pos| &self.persons[pos])
            .ok_or(LibrisError::PersonNotFound(id))
    }

    /// Books currently held by a person, in the order they were issued.
    pub fn books_issued_to(&self, person_id: u32) -> Result<Vec<&Book>> {
        let person = self.get_person(person_id)?;
        Ok(person
            .issued_books
            .iter()
            .filter_map(|id| self.book_index.get(*id).map(|pos| &self.books[pos]))
            .collect())
    }

    pub fn next_book_id(&self) -> u32 {
        self.next_book_id
    }

    pub fn next_user_id(&self) -> u32 {
        self.next_user_id
    }

    // --- Session ---

    /// Log in as the first librarian whose username and secret both match
    /// exactly. Members never match.
    pub fn authenticate(&mut self, username: &str, secret: &str) -> Option<&Person> {
        let found = self.persons.iter().find(|p| {
            p.role
                .credentials()
                .is_some_and(|c| c.matches(username, secret))
        })?;
        log::info!("librarian {} logged in", found.id);
        self.session = Some(found.id);
        self.current_librarian()
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.session.take() {
            log::info!("librarian {} logged out", id);
        }
    }

    pub fn current_librarian(&self) -> Option<&Person> {
        self.session.and_then(|id| self.get_person(id).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    // --- Loading ---

    /// Insert a decoded book as-is, advancing the counter past its id.
    pub(crate) fn insert_loaded_book(&mut self, book: Book) -> Result<()> {
        if book.id == 0 {
            return Err(LibrisError::invalid_state("book id must be positive"));
        }
        if self.book_index.contains(book.id) {
            return Err(LibrisError::invalid_state(format!(
                "duplicate book id {}",
                book.id
            )));
        }
        self.next_book_id = self.next_book_id.max(book.id.saturating_add(1));
        self.books.push(book);
        let pos = self.books.len() - 1;
        self.book_index.insert(self.books[pos].id, pos);
        Ok(())
    }

    /// Insert a decoded person as-is, advancing the counter past its id.
    /// The seed id is refused: the seed account always comes from the
    /// library itself.
    pub(crate) fn insert_loaded_person(&mut self, person: Person) -> Result<()> {
        if person.id == SEED_ID {
            return Err(LibrisError::invalid_state("user id 0 is reserved for the seed librarian"));
        }
        if self.person_index.contains(person.id) {
            return Err(LibrisError::invalid_state(format!(
                "duplicate user id {}",
                person.id
            )));
        }
        self.next_user_id = self.next_user_id.max(person.id.saturating_add(1));
        self.persons.push(person);
        let pos = self.persons.len() - 1;
        self.person_index.insert(self.persons[pos].id, pos);
        Ok(())
    }

    /// The seed is never persisted, so its loans only survive in the book
    /// lines. Rebuild its list from them after a load.
    pub(crate) fn relink_seed_loans(&mut self) -> usize {
        let Some(seed_pos) = self.person_index.get(SEED_ID) else {
            return 0;
        };
        let mut relinked = 0;
        for book in &self.books {
            if book.issued_to == Some(SEED_ID) && !self.persons[seed_pos].holds(book.id) {
                self.persons[seed_pos].push_issued(book.id);
                relinked += 1;
            }
        }
        relinked
    }

    // --- Consistency ---

    /// Repair the book/person cross references, as loaded data may disagree.
    pub fn doctor(&mut self) -> DoctorReport {
        let mut report = DoctorReport::default();

        for person in self.persons.iter_mut() {
            let mut kept: Vec<u32> = Vec::with_capacity(person.issued_books.len());
            for &book_id in &person.issued_books {
                match self.book_index.get(book_id) {
                    None => report.removed_missing_books += 1,
                    Some(pos) if self.books[pos].issued_to != Some(person.id) => {
                        report.removed_stale_entries += 1
                    }
                    Some(_) if kept.contains(&book_id) => report.removed_stale_entries += 1,
                    Some(_) => kept.push(book_id),
                }
            }
            person.issued_books = kept;
        }

        for book in &self.books {
            let Some(holder) = book.issued_to else {
                continue;
            };
            match self.person_index.get(holder) {
                Some(pos) if !self.persons[pos].holds(book.id) => {
                    self.persons[pos].push_issued(book.id);
                    report.relinked_books += 1;
                }
                Some(_) => {}
                None => {
                    log::warn!("book {} is issued to unknown user {}", book.id, holder);
                    report.dangling_books.push(book.id);
                }
            }
        }

        report
    }

    /// True when both indices mirror their collections and every loan is
    /// recorded on both sides.
    pub fn is_consistent(&self) -> bool {
        if !self.book_index.mirrors(&self.books, |b| b.id)
            || !self.person_index.mirrors(&self.persons, |p| p.id)
        {
            return false;
        }
        let books_agree = self.books.iter().all(|b| match b.issued_to {
            Some(holder) => self.get_person(holder).map_or(true, |p| p.holds(b.id)),
            None => true,
        });
        let persons_agree = self.persons.iter().all(|p| {
            p.issued_books
                .iter()
                .all(|id| self.get_book(*id).is_ok_and(|b| b.issued_to == Some(p.id)))
        });
        books_agree && persons_agree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with_member() -> Library {
        let mut lib = Library::new();
        lib.add_person("Alice", "a@x.com", Role::Member).unwrap();
        lib
    }

    #[test]
    fn starts_with_seed_librarian_only() {
        let lib = Library::new();
        assert!(lib.books().is_empty());
        assert_eq!(lib.persons().len(), 1);
        let seed = lib.get_person(SEED_ID).unwrap();
        assert!(seed.is_librarian());
        assert_eq!(seed.name, DEFAULT_SEED_NAME);
        assert_eq!(lib.next_user_id(), 1);
        assert!(!lib.is_authenticated());
    }

    #[test]
    fn auto_ids_are_sequential() {
        let mut lib = Library::new();
        assert_eq!(lib.add_book(None, "Dune", "Herbert", "001").unwrap().id, 1);
        assert_eq!(lib.add_book(None, "Emma", "Austen", "002").unwrap().id, 2);
        assert_eq!(lib.add_person("Alice", "a@x.com", Role::Member).unwrap().id, 1);
        assert_eq!(lib.add_person("Bob", "b@x.com", Role::Member).unwrap().id, 2);
    }

    #[test]
    fn explicit_id_advances_counter() {
        let mut lib = Library::new();
        lib.add_book(Some(10), "Dune", "Herbert", "001").unwrap();
        assert_eq!(lib.next_book_id(), 11);
        assert_eq!(lib.add_book(None, "Emma", "Austen", "002").unwrap().id, 11);

        lib.add_book(Some(5), "Ulysses", "Joyce", "003").unwrap();
        assert_eq!(lib.next_book_id(), 12);
    }

    #[test]
    fn explicit_id_must_be_new_and_positive() {
        let mut lib = Library::new();
        lib.add_book(Some(3), "Dune", "Herbert", "001").unwrap();
        assert!(matches!(
            lib.add_book(Some(3), "Emma", "Austen", "002"),
            Err(LibrisError::InvalidState(_))
        ));
        assert!(matches!(
            lib.add_book(Some(0), "Emma", "Austen", "002"),
            Err(LibrisError::InvalidState(_))
        ));
        assert_eq!(lib.books().len(), 1);
    }

    #[test]
    fn index_mirrors_collection_through_adds_and_deletes() {
        let mut lib = Library::new();
        for i in 0..6 {
            lib.add_book(None, format!("Book {}", i), "Anon", "").unwrap();
            assert!(lib.is_consistent());
        }
        for id in [3, 1, 6, 4] {
            lib.delete_book(id).unwrap();
            assert!(lib.is_consistent());
            assert!(lib.get_book(id).unwrap_err().is_not_found());
        }
        let ids: Vec<u32> = lib.books().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(lib.get_book(5).unwrap().title, "Book 4");
    }

    #[test]
    fn delete_missing_book_is_not_found() {
        let mut lib = Library::new();
        assert!(matches!(lib.delete_book(9), Err(LibrisError::BookNotFound(9))));
    }

    #[test]
    fn delete_issued_book_is_refused() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.issue_book(1, 1).unwrap();

        let before = lib.books().to_vec();
        assert!(matches!(lib.delete_book(1), Err(LibrisError::InvalidState(_))));
        assert_eq!(lib.books(), before.as_slice());
    }

    #[test]
    fn issue_then_return_restores_state() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.add_book(None, "Emma", "Austen", "002").unwrap();
        lib.issue_book(1, 1).unwrap();
        lib.issue_book(2, 1).unwrap();
        assert_eq!(lib.get_person(1).unwrap().issued_books, vec![1, 2]);
        assert!(lib.is_consistent());

        assert_eq!(lib.return_book(1).unwrap(), 1);
        let book = lib.get_book(1).unwrap();
        assert!(!book.is_issued());
        assert_eq!(book.issued_to, None);
        assert_eq!(lib.get_person(1).unwrap().issued_books, vec![2]);
        assert!(lib.is_consistent());
    }

    #[test]
    fn issue_checks_both_ids() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        assert!(matches!(lib.issue_book(7, 1), Err(LibrisError::BookNotFound(7))));
        assert!(matches!(lib.issue_book(1, 7), Err(LibrisError::PersonNotFound(7))));
        assert!(!lib.get_book(1).unwrap().is_issued());
    }

    #[test]
    fn issuing_issued_book_leaves_target_untouched() {
        let mut lib = library_with_member();
        lib.add_person("Bob", "b@x.com", Role::Member).unwrap();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.issue_book(1, 1).unwrap();

        assert!(matches!(lib.issue_book(1, 2), Err(LibrisError::InvalidState(_))));
        assert!(lib.get_person(2).unwrap().issued_books.is_empty());
        assert_eq!(lib.get_book(1).unwrap().issued_to, Some(1));
    }

    #[test]
    fn return_requires_issued_book() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        assert!(matches!(lib.return_book(1), Err(LibrisError::InvalidState(_))));
        assert!(matches!(lib.return_book(2), Err(LibrisError::BookNotFound(2))));
    }

    #[test]
    fn return_tolerates_missing_holder() {
        let mut lib = Library::new();
        let mut book = Book::new(4, "Dune", "Herbert", "001");
        book.issued_to = Some(42);
        lib.insert_loaded_book(book).unwrap();

        assert_eq!(lib.return_book(4).unwrap(), 42);
        assert!(!lib.get_book(4).unwrap().is_issued());
    }

    #[test]
    fn seed_librarian_can_borrow() {
        let mut lib = Library::new();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.issue_book(1, SEED_ID).unwrap();
        assert_eq!(lib.get_person(SEED_ID).unwrap().issued_books, vec![1]);
    }

    #[test]
    fn seed_loans_relinked_from_book_lines() {
        let mut lib = Library::new();
        let mut book = Book::new(3, "Dune", "Herbert", "001");
        book.issued_to = Some(SEED_ID);
        lib.insert_loaded_book(book).unwrap();
        assert!(!lib.is_consistent());

        assert_eq!(lib.relink_seed_loans(), 1);
        assert_eq!(lib.get_person(SEED_ID).unwrap().issued_books, vec![3]);
        assert!(lib.is_consistent());
        assert_eq!(lib.relink_seed_loans(), 0);
    }

    #[test]
    fn line_breaks_rejected_in_text_fields() {
        let mut lib = library_with_member();
        assert!(matches!(
            lib.add_book(None, "Du\nne", "Herbert", "001"),
            Err(LibrisError::InvalidState(_))
        ));
        assert!(lib.add_book(None, "Dune", "Her\rbert", "001").is_err());
        assert!(lib.books().is_empty());
        assert_eq!(lib.next_book_id(), 1);

        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        assert!(lib
            .update_book(1, &BookUpdate::new().title("Dune").isbn("0\n01"))
            .is_err());
        assert_eq!(lib.get_book(1).unwrap().isbn, "001");

        assert!(lib.add_person("Bo\nb", "b@x.com", Role::Member).is_err());
        assert!(lib
            .add_person("Bob", "b@x.com", Role::librarian("bob", "pw\r\n"))
            .is_err());
        assert_eq!(lib.persons().len(), 2);
        assert_eq!(lib.next_user_id(), 2);
    }

    #[test]
    fn user_id_exhaustion_is_an_error() {
        let mut lib = Library::new();
        lib.insert_loaded_person(Person::new(u32::MAX, "Max", "m@x.com", Role::Member))
            .unwrap();
        assert_eq!(lib.next_user_id(), u32::MAX);

        // u32::MAX itself is taken, and there is no id past it.
        assert!(matches!(
            lib.add_person("Alice", "a@x.com", Role::Member),
            Err(LibrisError::InvalidState(_))
        ));
        assert_eq!(lib.persons().len(), 2);
        assert!(lib.is_consistent());
    }

    #[test]
    fn update_replaces_only_given_fields() {
        let mut lib = Library::new();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        let book = lib
            .update_book(1, &BookUpdate::new().title("Dune Messiah").isbn(""))
            .unwrap();
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.isbn, "001");

        assert!(lib.update_book(2, &BookUpdate::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn search_is_case_sensitive_substring() {
        let mut lib = Library::new();
        lib.add_book(None, "Dune", "Frank Herbert", "001").unwrap();
        lib.add_book(None, "Dune Messiah", "Frank Herbert", "002").unwrap();
        lib.add_book(None, "Emma", "Jane Austen", "003").unwrap();

        let titles = |books: Vec<&Book>| books.iter().map(|b| b.id).collect::<Vec<_>>();
        assert_eq!(titles(lib.search_books("Dune", SearchField::Title)), vec![1, 2]);
        assert!(lib.search_books("dune", SearchField::Title).is_empty());
        assert_eq!(titles(lib.search_books("Austen", SearchField::Author)), vec![3]);
        assert_eq!(titles(lib.search_books("00", SearchField::Isbn)), vec![1, 2, 3]);
        assert_eq!(lib.search_books("", SearchField::Title).len(), 3);
    }

    #[test]
    fn available_and_held_listings() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.add_book(None, "Emma", "Austen", "002").unwrap();
        lib.add_book(None, "Ulysses", "Joyce", "003").unwrap();
        lib.issue_book(3, 1).unwrap();
        lib.issue_book(1, 1).unwrap();

        let available: Vec<u32> = lib.available_books().iter().map(|b| b.id).collect();
        assert_eq!(available, vec![2]);
        let held: Vec<u32> = lib.books_issued_to(1).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(held, vec![3, 1]);
        assert!(lib.books_issued_to(9).is_err());
    }

    #[test]
    fn authenticate_matches_librarians_exactly() {
        let mut lib = Library::new();
        lib.add_person("Alice", "a@x.com", Role::Member).unwrap();
        lib.add_person("Bob", "b@x.com", Role::librarian("bob", "Secret")).unwrap();

        assert!(lib.authenticate("bob", "secret").is_none());
        assert!(lib.authenticate("Bob", "Secret").is_none());
        assert!(lib.authenticate("", "").is_none());
        assert!(!lib.is_authenticated());

        let who = lib.authenticate("bob", "Secret").map(|p| p.id);
        assert_eq!(who, Some(2));
        assert_eq!(lib.current_librarian().map(|p| p.name.as_str()), Some("Bob"));

        lib.logout();
        assert!(lib.current_librarian().is_none());
        lib.logout();
        assert!(!lib.is_authenticated());
    }

    #[test]
    fn authenticate_seed_account() {
        let mut lib = Library::new();
        let who = lib
            .authenticate(DEFAULT_SEED_USERNAME, DEFAULT_SEED_SECRET)
            .map(|p| p.id);
        assert_eq!(who, Some(SEED_ID));
    }

    #[test]
    fn first_matching_librarian_wins() {
        let mut lib = Library::new();
        lib.add_person("Bob", "b@x.com", Role::librarian("admin", "admin123")).unwrap();
        let who = lib.authenticate("admin", "admin123").map(|p| p.id);
        assert_eq!(who, Some(SEED_ID));
    }

    #[test]
    fn loaded_records_advance_counters_and_reject_duplicates() {
        let mut lib = Library::new();
        lib.insert_loaded_book(Book::new(7, "Dune", "Herbert", "001")).unwrap();
        assert!(lib.insert_loaded_book(Book::new(7, "Emma", "Austen", "002")).is_err());
        assert!(lib.insert_loaded_book(Book::default()).is_err());
        assert_eq!(lib.next_book_id(), 8);

        lib.insert_loaded_person(Person::new(4, "Alice", "a@x.com", Role::Member))
            .unwrap();
        assert!(lib
            .insert_loaded_person(Person::new(0, "Root", "r@x.com", Role::librarian("r", "r")))
            .is_err());
        assert_eq!(lib.next_user_id(), 5);
        assert!(lib.is_consistent());
    }

    #[test]
    fn doctor_repairs_cross_references() {
        let mut lib = Library::new();
        let mut held = Book::new(1, "Dune", "Herbert", "001");
        held.issued_to = Some(1);
        let mut orphan = Book::new(2, "Emma", "Austen", "002");
        orphan.issued_to = Some(99);
        lib.insert_loaded_book(held).unwrap();
        lib.insert_loaded_book(orphan).unwrap();
        lib.insert_loaded_book(Book::new(3, "Ulysses", "Joyce", "003")).unwrap();

        let mut alice = Person::new(1, "Alice", "a@x.com", Role::Member);
        // 3 is not issued, 50 does not exist, 1 is missing from the list.
        alice.issued_books = vec![3, 50];
        lib.insert_loaded_person(alice).unwrap();
        assert!(!lib.is_consistent());

        let report = lib.doctor();
        assert_eq!(report.removed_missing_books, 1);
        assert_eq!(report.removed_stale_entries, 1);
        assert_eq!(report.relinked_books, 1);
        assert_eq!(report.dangling_books, vec![2]);
        assert_eq!(lib.get_person(1).unwrap().issued_books, vec![1]);
        assert!(lib.is_consistent());

        assert!(lib.doctor().dangling_books == vec![2]);
    }

    #[test]
    fn doctor_on_clean_library_reports_nothing() {
        let mut lib = library_with_member();
        lib.add_book(None, "Dune", "Herbert", "001").unwrap();
        lib.issue_book(1, 1).unwrap();
        assert!(lib.doctor().is_clean());
    }
}
