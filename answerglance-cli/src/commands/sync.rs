//! `sync` - push a library JSON file into the shared store.

use crate::error::CliError;
use answerglance::library::LibraryPayload;
use answerglance::refresh::RefreshReceiver;
use answerglance::service::AnswerService;
use std::fs;
use std::path::Path;

pub fn run(
    service: &AnswerService,
    refresh_events: &mut RefreshReceiver,
    file: &Path,
) -> Result<(), CliError> {
    let contents = fs::read_to_string(file).map_err(|source| CliError::LibraryFile {
        path: file.display().to_string(),
        source,
    })?;
    let payload: LibraryPayload =
        serde_json::from_str(&contents).map_err(|source| CliError::LibraryFormat {
            path: file.display().to_string(),
            source,
        })?;

    if !payload.is_valid() {
        eprintln!(
            "warning: library '{}' has no answers; displays will show the fallback text",
            payload.id
        );
    }

    service.sync_library(&payload)?;

    println!(
        "Synced library '{}' ({}) with {} answers",
        payload.id,
        payload.name,
        payload.answers.len()
    );
    if refresh_events.try_recv().is_ok() {
        println!("Refresh signal fired: reload all timelines");
    }
    Ok(())
}
