use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::library::Library;

pub fn run(library: &mut Library) -> Result<CmdResult> {
    let report = library.doctor();
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found:"));
        if report.removed_missing_books > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} loan entry(ies) naming books that do not exist.",
                report.removed_missing_books
            )));
        }
        if report.removed_stale_entries > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} stale or duplicate loan entry(ies).",
                report.removed_stale_entries
            )));
        }
        if report.relinked_books > 0 {
            result.add_message(CmdMessage::success(format!(
                "  - Relinked {} issued book(s) to their holder.",
                report.relinked_books
            )));
        }
        if !report.dangling_books.is_empty() {
            let ids: Vec<String> = report.dangling_books.iter().map(|id| id.to_string()).collect();
            result.add_message(CmdMessage::warning(format!(
                "  - Book(s) issued to unknown users: {} (return them to clear)",
                ids.join(", ")
            )));
        }
    }

    result.doctor = Some(report);
    Ok(result)
}
