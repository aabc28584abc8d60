use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;

pub fn issue(library: &mut Library, book_id: u32, person_id: u32) -> Result<CmdResult> {
    library.issue_book(book_id, person_id)?;

    let book = library.get_book(book_id)?.clone();
    let holder = library.get_person(person_id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Book issued ({}): {} to {}",
            book.id, book.title, holder.name
        )))
        .with_affected_books(vec![book]))
}

pub fn return_book(library: &mut Library, book_id: u32) -> Result<CmdResult> {
    let holder_id = library.return_book(book_id)?;

    let book = library.get_book(book_id)?.clone();
    let from = match library.get_person(holder_id) {
        Ok(p) => p.name.clone(),
        Err(_) => format!("unknown user {}", holder_id),
    };
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Book returned ({}): {} from {}",
            book.id, book.title, from
        )))
        .with_affected_books(vec![book]))
}

/// Books currently held by one person.
pub fn held_by(library: &Library, person_id: u32) -> Result<CmdResult> {
    let books = library
        .books_issued_to(person_id)?
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_books(books))
}
