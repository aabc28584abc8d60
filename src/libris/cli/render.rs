//! # Rendering
//!
//! Turns books, persons and messages into terminal text. Layout (width,
//! truncation, padding) is computed on the plain text first so colored cells
//! stay aligned.

use colored::Colorize;
use libris::api::{CmdMessage, MessageLevel};
use libris::model::{Book, Person};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 22;
const ISBN_WIDTH: usize = 16;
const STATUS_WIDTH: usize = 10;
const NAME_WIDTH: usize = 24;
const EMAIL_WIDTH: usize = 28;
const ROLE_WIDTH: usize = 10;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_book_table(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}{}{}{}{}{}\n",
        cell("ID", ID_WIDTH),
        cell("Title", TITLE_WIDTH),
        cell("Author", AUTHOR_WIDTH),
        cell("ISBN", ISBN_WIDTH),
        cell("Status", STATUS_WIDTH),
        "Holder"
    )
    .bold()
    .to_string());

    for book in books {
        let status = cell(book.status_label(), STATUS_WIDTH);
        let status = if book.is_issued() {
            status.yellow()
        } else {
            status.green()
        };
        let holder = book
            .issued_to
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{}{}{}{}{}{}\n",
            cell(&book.id.to_string(), ID_WIDTH),
            cell(&book.title, TITLE_WIDTH),
            cell(&book.author, AUTHOR_WIDTH),
            cell(&book.isbn, ISBN_WIDTH).dimmed(),
            status,
            holder
        ));
    }
    out
}

pub(super) fn render_person_table(persons: &[Person]) -> String {
    if persons.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}{}{}{}{}\n",
        cell("ID", ID_WIDTH),
        cell("Name", NAME_WIDTH),
        cell("Email", EMAIL_WIDTH),
        cell("Role", ROLE_WIDTH),
        "Books"
    )
    .bold()
    .to_string());

    for person in persons {
        let role = cell(person.role.label(), ROLE_WIDTH);
        let role = if person.is_librarian() {
            role.cyan()
        } else {
            role.normal()
        };
        out.push_str(&format!(
            "{}{}{}{}{}\n",
            cell(&person.id.to_string(), ID_WIDTH),
            cell(&person.name, NAME_WIDTH),
            cell(&person.email, EMAIL_WIDTH),
            role,
            person.issued_books.len()
        ));
    }
    out
}

/// A single book, field per line.
pub(super) fn render_book_detail(book: &Book) -> String {
    let holder = match book.issued_to {
        Some(id) => format!("issued to user {}", id).yellow().to_string(),
        None => "available".green().to_string(),
    };
    format!(
        "{} {}\n  Author: {}\n  ISBN:   {}\n  Status: {}\n",
        book.id.to_string().yellow(),
        book.title.bold(),
        book.author,
        book.isbn,
        holder
    )
}

pub(super) fn render_person_detail(person: &Person) -> String {
    let mut out = format!(
        "{} {}\n  Email:  {}\n  Role:   {}\n",
        person.id.to_string().yellow(),
        person.name.bold(),
        person.email,
        person.role.label()
    );
    if let Some(credentials) = person.role.credentials() {
        out.push_str(&format!("  Login:  {}\n", credentials.username));
    }
    out
}

pub(super) fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Truncate to `width - 1` columns and pad to `width`, leaving one column of
/// separation.
fn cell(text: &str, width: usize) -> String {
    let shown = truncate_to_width(text, width.saturating_sub(1));
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris::model::Role;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
        assert_eq!(truncate_to_width("Foundation", 5), "Foun…");
        // CJK characters take two columns each.
        let cut = truncate_to_width("三体三体三体", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn cells_are_fixed_width() {
        assert_eq!(cell("ID", ID_WIDTH).width(), ID_WIDTH);
        assert_eq!(cell("a very long title that overflows", 10).width(), 10);
    }

    #[test]
    fn book_table_lists_status_and_holder() {
        plain();
        let mut issued = Book::new(2, "Emma", "Austen", "002");
        issued.issued_to = Some(7);
        let books = vec![Book::new(1, "Dune", "Herbert", "001"), issued];

        let out = render_book_table(&books);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Available"));
        assert!(lines[1].trim_end().ends_with('-'));
        assert!(lines[2].contains("Issued"));
        assert!(lines[2].trim_end().ends_with('7'));
    }

    #[test]
    fn empty_tables() {
        assert_eq!(render_book_table(&[]), "No books found.\n");
        assert_eq!(render_person_table(&[]), "No users found.\n");
        assert_eq!(render_text_list(&[], "Nothing."), "Nothing.\n");
    }

    #[test]
    fn person_detail_shows_login_for_librarians() {
        plain();
        let member = Person::new(1, "Alice", "a@x.com", Role::Member);
        assert!(!render_person_detail(&member).contains("Login"));

        let librarian = Person::new(2, "Bob", "b@x.com", Role::librarian("bob", "pw"));
        let out = render_person_detail(&librarian);
        assert!(out.contains("Librarian"));
        assert!(out.contains("Login:  bob"));
        assert!(!out.contains("pw"));
    }
}
