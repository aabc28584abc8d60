use super::{Collection, DataStore};
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    collections: HashMap<Collection, Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self, collection: Collection) -> &[String] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl DataStore for InMemoryStore {
    fn read_lines(&self, collection: Collection) -> Result<Vec<String>> {
        Ok(self.lines(collection).to_vec())
    }

    fn write_lines(&mut self, collection: Collection, lines: &[String]) -> Result<()> {
        self.collections.insert(collection, lines.to_vec());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::codec::{encode_book, encode_person};
    use crate::model::{Book, Person, Role};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        books: Vec<String>,
        users: Vec<String>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                books: Vec::new(),
                users: Vec::new(),
            }
        }

        pub fn with_books(mut self, count: u32) -> Self {
            for i in 1..=count {
                let book = Book::new(i, format!("Book {}", i), format!("Author {}", i), "");
                self.books.push(encode_book(&book));
            }
            self.flush()
        }

        pub fn with_book(mut self, book: &Book) -> Self {
            self.books.push(encode_book(book));
            self.flush()
        }

        pub fn with_member(mut self, id: u32, name: &str) -> Self {
            let person = Person::new(id, name, format!("{}@example.com", name), Role::Member);
            self.users.push(encode_person(&person));
            self.flush()
        }

        pub fn with_person(mut self, person: &Person) -> Self {
            self.users.push(encode_person(person));
            self.flush()
        }

        pub fn with_raw_line(mut self, collection: Collection, line: &str) -> Self {
            match collection {
                Collection::Books => self.books.push(line.to_string()),
                Collection::Users => self.users.push(line.to_string()),
            }
            self.flush()
        }

        fn flush(mut self) -> Self {
            self.store
                .write_lines(Collection::Books, &self.books)
                .unwrap();
            self.store
                .write_lines(Collection::Users, &self.users)
                .unwrap();
            self
        }
    }
}
