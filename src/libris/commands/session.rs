use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibrisError, Result};
use crate::library::Library;

pub fn login(library: &mut Library, username: &str, secret: &str) -> Result<CmdResult> {
    match library.authenticate(username, secret) {
        Some(librarian) => {
            let librarian = librarian.clone();
            Ok(CmdResult::default()
                .with_message(CmdMessage::info(format!("Logged in as {}", librarian.name)))
                .with_listed_persons(vec![librarian]))
        }
        None => Err(LibrisError::Unauthorized("invalid credentials".to_string())),
    }
}

pub fn logout(library: &mut Library) -> Result<CmdResult> {
    let was_logged_in = library.is_authenticated();
    library.logout();

    let message = if was_logged_in {
        CmdMessage::success("Logged out.")
    } else {
        CmdMessage::info("Not logged in.")
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn whoami(library: &Library) -> Result<CmdResult> {
    let result = match library.current_librarian() {
        Some(librarian) => CmdResult::default().with_listed_persons(vec![librarian.clone()]),
        None => CmdResult::default().with_message(CmdMessage::info("Not logged in.")),
    };
    Ok(result)
}

/// Fail unless a librarian is logged in.
pub fn require_librarian(library: &Library) -> Result<()> {
    if library.is_authenticated() {
        Ok(())
    } else {
        Err(LibrisError::Unauthorized(
            "this action needs a librarian login (--user/--password)".to_string(),
        ))
    }
}
