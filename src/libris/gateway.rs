//! # Persistence Gateway
//!
//! Bulk load and save of the whole [`Library`] through any [`DataStore`].
//!
//! Loading decodes each line on its own. A line that fails to decode, or that
//! would break a library invariant (duplicate id, book id 0), is skipped and
//! recorded in the [`LoadReport`]; the rest of the collection still loads.
//! Blank lines are ignored.
//!
//! The seed librarian (id 0) is never written, and any persisted user with id
//! 0 is skipped on load, so the seed always comes from configuration. Books
//! issued to the seed are relinked to it once loading is done.

use crate::codec::{decode_book, decode_person, encode_book, encode_person};
use crate::error::Result;
use crate::library::{Library, SEED_ID};
use crate::store::{Collection, DataStore};

/// A persisted line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub collection: Collection,
    /// 1-based line number in the collection.
    pub line_number: usize,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub books_loaded: usize,
    pub users_loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub books_saved: usize,
    pub users_saved: usize,
}

/// Read both collections into `library`.
pub fn load_all<S: DataStore>(store: &S, library: &mut Library) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for (n, line) in store.read_lines(Collection::Books)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_book(line).and_then(|book| library.insert_loaded_book(book)) {
            Ok(()) => report.books_loaded += 1,
            Err(e) => skip(&mut report, Collection::Books, n + 1, e.to_string()),
        }
    }

    for (n, line) in store.read_lines(Collection::Users)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let person = match decode_person(line) {
            Ok(person) => person,
            Err(e) => {
                skip(&mut report, Collection::Users, n + 1, e.to_string());
                continue;
            }
        };
        if person.id == SEED_ID {
            log::debug!("users line {}: seed account entry ignored", n + 1);
            continue;
        }
        match library.insert_loaded_person(person) {
            Ok(()) => report.users_loaded += 1,
            Err(e) => skip(&mut report, Collection::Users, n + 1, e.to_string()),
        }
    }

    let relinked = library.relink_seed_loans();
    if relinked > 0 {
        log::debug!("relinked {} book(s) held by the seed account", relinked);
    }

    log::info!(
        "loaded {} book(s), {} user(s), skipped {} line(s)",
        report.books_loaded,
        report.users_loaded,
        report.skipped.len()
    );
    Ok(report)
}

/// Replace both collections with the library's records, in collection order.
pub fn save_all<S: DataStore>(store: &mut S, library: &Library) -> Result<SaveReport> {
    let book_lines: Vec<String> = library.books().iter().map(encode_book).collect();
    let user_lines: Vec<String> = library
        .persons()
        .iter()
        .filter(|p| p.id != SEED_ID)
        .map(encode_person)
        .collect();

    store.write_lines(Collection::Books, &book_lines)?;
    store.write_lines(Collection::Users, &user_lines)?;

    let report = SaveReport {
        books_saved: book_lines.len(),
        users_saved: user_lines.len(),
    };
    log::info!(
        "saved {} book(s), {} user(s)",
        report.books_saved,
        report.users_saved
    );
    Ok(report)
}

fn skip(report: &mut LoadReport, collection: Collection, line_number: usize, reason: String) {
    log::warn!("{} line {} skipped: {}", collection, line_number, reason);
    report.skipped.push(SkippedLine {
        collection,
        line_number,
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Person, Role};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn loads_records_and_advances_counters() {
        let fixture = StoreFixture::new().with_books(3).with_member(4, "alice");
        let mut library = Library::new();
        let report = load_all(&fixture.store, &mut library).unwrap();

        assert_eq!(report.books_loaded, 3);
        assert_eq!(report.users_loaded, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(library.next_book_id(), 4);
        assert_eq!(library.next_user_id(), 5);
        assert_eq!(library.persons().len(), 2);
        assert!(library.is_consistent());
    }

    #[test]
    fn bad_lines_are_skipped_individually() {
        let fixture = StoreFixture::new()
            .with_raw_line(Collection::Books, "1,Dune,Herbert,001,0,-1")
            .with_raw_line(Collection::Books, "two,Emma,Austen,002,0,-1")
            .with_raw_line(Collection::Books, "")
            .with_raw_line(Collection::Books, "3,Ulysses,Joyce,003,0,-1")
            .with_raw_line(Collection::Books, "3,Ulysses again,Joyce,003,0,-1")
            .with_raw_line(Collection::Users, "1,Alice,a@x.com,USER,x");

        let mut library = Library::new();
        let report = load_all(&fixture.store, &mut library).unwrap();

        assert_eq!(report.books_loaded, 2);
        assert_eq!(report.users_loaded, 0);
        let skipped: Vec<(Collection, usize)> = report
            .skipped
            .iter()
            .map(|s| (s.collection, s.line_number))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (Collection::Books, 2),
                (Collection::Books, 5),
                (Collection::Users, 1)
            ]
        );
        assert!(library.is_consistent());
    }

    #[test]
    fn short_book_line_is_skipped_as_id_zero() {
        let fixture = StoreFixture::new().with_raw_line(Collection::Books, "7,Dune");
        let mut library = Library::new();
        let report = load_all(&fixture.store, &mut library).unwrap();
        assert_eq!(report.books_loaded, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(library.books().is_empty());
    }

    #[test]
    fn persisted_seed_entry_is_ignored() {
        let fixture = StoreFixture::new()
            .with_raw_line(Collection::Users, "0,Old Admin,old@x.com,ADMIN,,old,pw")
            .with_member(1, "alice");
        let mut library = Library::new();
        let report = load_all(&fixture.store, &mut library).unwrap();

        assert_eq!(report.users_loaded, 1);
        assert!(report.skipped.is_empty());
        assert_eq!(library.persons().len(), 2);
        assert_eq!(library.get_person(0).unwrap().name, "System Admin");
        assert!(library.authenticate("old", "pw").is_none());
    }

    #[test]
    fn save_excludes_seed_and_keeps_order() {
        let mut library = Library::new();
        library.add_book(None, "Dune", "Herbert", "001").unwrap();
        library.add_book(None, "Emma", "Austen", "002").unwrap();
        library.add_person("Alice", "a@x.com", Role::Member).unwrap();
        library.add_person("Bob", "b@x.com", Role::librarian("bob", "pw")).unwrap();
        library.issue_book(2, 1).unwrap();

        let mut store = InMemoryStore::new();
        let report = save_all(&mut store, &library).unwrap();
        assert_eq!(report.books_saved, 2);
        assert_eq!(report.users_saved, 2);
        assert_eq!(
            store.lines(Collection::Books),
            ["1,Dune,Herbert,001,0,-1", "2,Emma,Austen,002,1,1"]
        );
        assert_eq!(
            store.lines(Collection::Users),
            ["1,Alice,a@x.com,USER,2", "2,Bob,b@x.com,ADMIN,,bob,pw"]
        );
    }

    #[test]
    fn save_then_load_reproduces_library() {
        let mut library = Library::new();
        library.add_book(Some(5), "Dune", "Herbert", "001").unwrap();
        library.add_book(None, "Emma", "Austen", "002").unwrap();
        library.add_person("Alice", "a@x.com", Role::Member).unwrap();
        library.add_person("Bob", "b@x.com", Role::librarian("bob", "pw")).unwrap();
        library.issue_book(5, 2).unwrap();
        library.issue_book(6, 2).unwrap();

        let mut store = InMemoryStore::new();
        save_all(&mut store, &library).unwrap();

        let mut reloaded = Library::new();
        load_all(&store, &mut reloaded).unwrap();

        assert_eq!(reloaded.books(), library.books());
        assert_eq!(reloaded.persons(), library.persons());
        assert_eq!(reloaded.next_book_id(), library.next_book_id());
        assert_eq!(reloaded.next_user_id(), library.next_user_id());
        assert!(reloaded.is_consistent());
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn seed_loans_survive_save_and_load() {
        let mut library = Library::new();
        library.add_book(None, "Dune", "Herbert", "001").unwrap();
        library.issue_book(1, SEED_ID).unwrap();

        let mut store = InMemoryStore::new();
        save_all(&mut store, &library).unwrap();
        assert!(store.lines(Collection::Users).is_empty());

        let mut reloaded = Library::new();
        load_all(&store, &mut reloaded).unwrap();
        assert_eq!(reloaded.get_book(1).unwrap().issued_to, Some(SEED_ID));
        assert_eq!(reloaded.get_person(SEED_ID).unwrap().issued_books, vec![1]);
        assert!(reloaded.is_consistent());

        assert_eq!(reloaded.return_book(1).unwrap(), SEED_ID);
        assert!(reloaded.get_person(SEED_ID).unwrap().issued_books.is_empty());
    }

    #[test]
    fn loads_issued_books_and_lists() {
        let mut book = Book::new(1, "Dune", "Herbert", "001");
        book.issued_to = Some(2);
        let mut bob = Person::new(2, "Bob", "b@x.com", Role::Member);
        bob.issued_books = vec![1];
        let fixture = StoreFixture::new().with_book(&book).with_person(&bob);

        let mut library = Library::new();
        load_all(&fixture.store, &mut library).unwrap();
        assert_eq!(library.return_book(1).unwrap(), 2);
        assert!(library.get_person(2).unwrap().issued_books.is_empty());
    }
}
