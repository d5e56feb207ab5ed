//! `timeline` - generate and print a timeline for a display-surface size.

use crate::error::CliError;
use answerglance::service::AnswerService;
use answerglance::timeline::SizeClass;

pub fn run(service: &AnswerService, size: &str, limit: usize) -> Result<(), CliError> {
    let size_class: SizeClass = size.parse().map_err(CliError::InvalidArgument)?;
    let plan = service.timeline(size_class);

    println!(
        "Timeline for a {} surface: {} entries, refresh eligible at {}",
        size_class,
        plan.entries.len(),
        plan.next_eligible_refresh.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for entry in plan.entries.iter().take(limit) {
        println!(
            "  {}  {}  ({})",
            entry.at.format("%H:%M:%S"),
            entry.text,
            entry.library_name
        );
    }
    if plan.entries.len() > limit {
        println!("  ... {} more entries", plan.entries.len() - limit);
    }
    Ok(())
}
