//! `library` - print or select the current library id.

use crate::error::CliError;
use answerglance::refresh::RefreshReceiver;
use answerglance::service::AnswerService;

pub fn run(
    service: &AnswerService,
    id: Option<&str>,
    refresh_events: &mut RefreshReceiver,
) -> Result<(), CliError> {
    match id {
        Some(id) => {
            service.set_current_library(id)?;
            println!("Current library set to '{}'", id);
            if refresh_events.try_recv().is_ok() {
                println!("Refresh signal fired: reload all timelines");
            }
        }
        None => {
            println!("{}", service.current_library_id());
        }
    }
    Ok(())
}
