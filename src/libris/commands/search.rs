use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;
use crate::model::SearchField;

pub fn run(library: &Library, field: SearchField, query: &str) -> Result<CmdResult> {
    let matches: Vec<_> = library
        .search_books(query, field)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No books found with {} containing \"{}\".",
            field, query
        )));
    }
    Ok(result.with_listed_books(matches))
}
