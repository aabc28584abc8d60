use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;
use crate::model::BookUpdate;

pub fn add(
    library: &mut Library,
    id: Option<u32>,
    title: String,
    author: String,
    isbn: String,
) -> Result<CmdResult> {
    let book = library.add_book(id, title, author, isbn)?.clone();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Book added ({}): {}",
            book.id, book.title
        )))
        .with_affected_books(vec![book]))
}

/// All books in catalog order, or only the ones on the shelf.
pub fn list(library: &Library, available_only: bool) -> Result<CmdResult> {
    let books = if available_only {
        library.available_books().into_iter().cloned().collect()
    } else {
        library.books().to_vec()
    };
    Ok(CmdResult::default().with_listed_books(books))
}

pub fn view(library: &Library, id: u32) -> Result<CmdResult> {
    let book = library.get_book(id)?.clone();
    Ok(CmdResult::default().with_listed_books(vec![book]))
}

pub fn update(library: &mut Library, id: u32, update: &BookUpdate) -> Result<CmdResult> {
    let before = library.get_book(id)?.clone();
    let after = library.update_book(id, update)?.clone();

    let message = if before == after {
        CmdMessage::info(format!("Book unchanged ({}): {}", id, after.title))
    } else {
        CmdMessage::success(format!("Book updated ({}): {}", id, after.title))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_affected_books(vec![after]))
}

pub fn delete(library: &mut Library, id: u32) -> Result<CmdResult> {
    let removed = library.delete_book(id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Book deleted ({}): {}",
            removed.id, removed.title
        )))
        .with_affected_books(vec![removed]))
}
