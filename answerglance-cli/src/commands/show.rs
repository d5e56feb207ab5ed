//! `show` - print the answer a display surface would show right now.

use crate::error::CliError;
use answerglance::service::AnswerService;

pub fn run(service: &AnswerService) -> Result<(), CliError> {
    let answer = service.snapshot_answer();
    println!("{}", answer.text);
    println!("({})", answer.library_name);
    Ok(())
}
