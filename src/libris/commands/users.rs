use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;
use crate::model::Role;

pub fn add(library: &mut Library, name: String, email: String, role: Role) -> Result<CmdResult> {
    let person = library.add_person(name, email, role)?.clone();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} added ({}): {}",
            person.role.label(),
            person.id,
            person.name
        )))
        .with_listed_persons(vec![person]))
}

pub fn list(library: &Library) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_persons(library.persons().to_vec()))
}

/// One person plus the books they hold.
pub fn view(library: &Library, id: u32) -> Result<CmdResult> {
    let person = library.get_person(id)?.clone();
    let held = library
        .books_issued_to(id)?
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default()
        .with_listed_persons(vec![person])
        .with_listed_books(held))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_user_gets_id_one() {
        let mut library = Library::new();
        let result = add(&mut library, "Alice".into(), "a@x.com".into(), Role::Member).unwrap();
        assert_eq!(result.listed_persons[0].id, 1);
        assert_eq!(result.messages[0].content, "Member added (1): Alice");

        let result = add(
            &mut library,
            "Bob".into(),
            "b@x.com".into(),
            Role::librarian("bob", "pw"),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "Librarian added (2): Bob");
    }

    #[test]
    fn list_includes_seed() {
        let library = Library::new();
        let result = list(&library).unwrap();
        assert_eq!(result.listed_persons.len(), 1);
        assert!(result.listed_persons[0].is_librarian());
    }

    #[test]
    fn view_lists_held_books() {
        let mut library = Library::new();
        library.add_person("Alice", "a@x.com", Role::Member).unwrap();
        library.add_book(None, "Dune", "Herbert", "001").unwrap();
        library.issue_book(1, 1).unwrap();

        let result = view(&library, 1).unwrap();
        assert_eq!(result.listed_persons[0].name, "Alice");
        assert_eq!(result.listed_books[0].title, "Dune");
        assert!(view(&library, 8).unwrap_err().is_not_found());
    }
}
