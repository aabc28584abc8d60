//! # Line Codec
//!
//! Each record is persisted as one comma-separated line:
//!
//! ```text
//! book:       id,title,author,isbn,issued(0|1),issuedTo(-1 if none)
//! member:     id,name,email,USER,bookIds(;-joined)
//! librarian:  id,name,email,ADMIN,bookIds(;-joined),username,secret
//! ```
//!
//! Commas inside free-text fields are not escaped. A title such as
//! `"Rust, Fast"` shifts every later field on decode; this is a property of
//! the format and is not worked around here.
//!
//! Decoding is lenient about arity: a line with fewer fields than the record
//! needs decodes to the record's default value. It is strict about numbers:
//! a numeric field that is not an integer is a [`LibrisError::Decode`].

use crate::error::{LibrisError, Result};
use crate::model::{Book, Credentials, Person, Role};

pub const FIELD_SEP: char = ',';
pub const LIST_SEP: char = ';';

pub const BOOK_ARITY: usize = 6;
pub const MEMBER_ARITY: usize = 5;
pub const LIBRARIAN_ARITY: usize = 7;

const MEMBER_TAG: &str = "USER";
const LIBRARIAN_TAG: &str = "ADMIN";
const LIBRARIAN_MARKER: &str = ",ADMIN,";
const NO_HOLDER: i64 = -1;

pub fn encode_book(book: &Book) -> String {
    let holder = book.issued_to.map(i64::from).unwrap_or(NO_HOLDER);
    format!(
        "{},{},{},{},{},{}",
        book.id,
        book.title,
        book.author,
        book.isbn,
        u8::from(book.is_issued()),
        holder
    )
}

pub fn decode_book(line: &str) -> Result<Book> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();
    if fields.len() < BOOK_ARITY {
        return Ok(Book::default());
    }

    let id = parse_id(line, fields[0], "book id")?;
    let issued = parse_int(line, fields[4], "issued flag")? != 0;
    let holder = parse_int(line, fields[5], "issued-to id")?;

    let issued_to = match (issued, holder) {
        (true, h) if h >= 0 => Some(
            u32::try_from(h).map_err(|_| LibrisError::decode(line, "issued-to id out of range"))?,
        ),
        (true, _) => {
            log::warn!("book {} marked issued without a holder, treating as available", id);
            None
        }
        (false, _) => None,
    };

    Ok(Book {
        id,
        title: fields[1].to_string(),
        author: fields[2].to_string(),
        isbn: fields[3].to_string(),
        issued_to,
    })
}

pub fn encode_person(person: &Person) -> String {
    let books = person
        .issued_books
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&LIST_SEP.to_string());

    match &person.role {
        Role::Member => format!(
            "{},{},{},{},{}",
            person.id, person.name, person.email, MEMBER_TAG, books
        ),
        Role::Librarian(creds) => format!(
            "{},{},{},{},{},{},{}",
            person.id,
            person.name,
            person.email,
            LIBRARIAN_TAG,
            books,
            creds.username,
            creds.secret
        ),
    }
}

/// True when the raw line carries the librarian role tag.
pub fn is_librarian_line(line: &str) -> bool {
    line.contains(LIBRARIAN_MARKER)
}

pub fn decode_person(line: &str) -> Result<Person> {
    let line = line.trim_end_matches(['\r', '\n']);
    let librarian = is_librarian_line(line);
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();

    let arity = if librarian {
        LIBRARIAN_ARITY
    } else {
        MEMBER_ARITY
    };
    if fields.len() < arity {
        let role = if librarian {
            Role::Librarian(Credentials::default())
        } else {
            Role::Member
        };
        return Ok(Person {
            role,
            ..Person::default()
        });
    }

    let id = parse_id(line, fields[0], "user id")?;
    let role = if librarian {
        Role::librarian(fields[5], fields[6])
    } else {
        Role::Member
    };

    let mut person = Person::new(id, fields[1], fields[2], role);
    for part in fields[4].split(LIST_SEP).map(str::trim).filter(|p| !p.is_empty()) {
        person.push_issued(parse_id(line, part, "issued book id")?);
    }
    Ok(person)
}

fn parse_id(line: &str, raw: &str, what: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| LibrisError::decode(line, format!("invalid {} {:?}: {}", what, raw, e)))
}

fn parse_int(line: &str, raw: &str, what: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| LibrisError::decode(line, format!("invalid {} {:?}: {}", what, raw, e)))
}
