//! `perf` - run instrumented reads and print the performance report.

use crate::error::CliError;
use answerglance::service::AnswerService;

pub fn run(service: &AnswerService, samples: usize) -> Result<(), CliError> {
    // Clearing the cache before each read times the real store round-trip
    // rather than a string of cache hits.
    for _ in 0..samples {
        service.clear_cache();
        service.snapshot_answer();
    }

    print!("{}", service.format_performance_report());
    if service.check_performance() {
        println!("All operations within budget");
    } else {
        println!("Some operations exceed their latency budget");
    }
    Ok(())
}
