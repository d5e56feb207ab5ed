//! Operation timing against latency budgets.
//!
//! Named operations are timed with start/stop pairs; samples accumulate
//! per operation until an explicit reset. [`PerformanceMonitor::check_thresholds`]
//! is a coarse regression gate over the averages, not request-time control.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Well-known operation names used by the service layer.
pub mod ops {
    /// Payload read through the library cache.
    pub const GET_LIBRARY_DATA: &str = "get_library_data";
    /// Answer selection from an already-loaded payload.
    pub const SELECT_ANSWER: &str = "select_answer";
}

/// Latency budget in milliseconds for an operation's average duration.
pub fn budget_ms(operation: &str) -> f64 {
    match operation {
        ops::GET_LIBRARY_DATA => 10.0,
        ops::SELECT_ANSWER => 5.0,
        _ => 20.0,
    }
}

/// Aggregate statistics for one operation, durations in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationStats {
    pub count: usize,
    pub average_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Default)]
struct MonitorState {
    samples: HashMap<String, Vec<Duration>>,
    // At most one in-flight measurement per operation name.
    started: HashMap<String, Instant>,
}

/// Wall-clock timer for named operations.
///
/// `start`/`stop` pairs append duration samples; unmatched calls are
/// forgiving (`start` overwrites a prior unmatched start, `stop` without a
/// start is a silent no-op) so instrumentation can never break the
/// operation it measures.
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    state: Mutex<MonitorState>,
}

impl PerformanceMonitor {
    /// Create a monitor with no recorded samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `operation` as started now.
    ///
    /// Overwrites any prior start for the same name that was never stopped.
    pub fn start(&self, operation: &str) {
        let mut state = self.state.lock().unwrap();
        state.started.insert(operation.to_string(), Instant::now());
    }

    /// Record the elapsed time since the matching [`start`](Self::start).
    ///
    /// Silently does nothing when no start is pending for `operation`.
    pub fn stop(&self, operation: &str) {
        let mut state = self.state.lock().unwrap();
        let Some(started_at) = state.started.remove(operation) else {
            return;
        };
        let elapsed = started_at.elapsed();
        state
            .samples
            .entry(operation.to_string())
            .or_default()
            .push(elapsed);

        debug!(
            operation,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "operation timed"
        );
    }

    /// Append a sample directly, without a start/stop pair.
    pub fn record(&self, operation: &str, duration: Duration) {
        let mut state = self.state.lock().unwrap();
        state
            .samples
            .entry(operation.to_string())
            .or_default()
            .push(duration);
    }

    /// Aggregate statistics per operation.
    pub fn report(&self) -> HashMap<String, OperationStats> {
        let state = self.state.lock().unwrap();
        state
            .samples
            .iter()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(operation, samples)| {
                let millis: Vec<f64> =
                    samples.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
                let total: f64 = millis.iter().sum();
                let stats = OperationStats {
                    count: millis.len(),
                    average_ms: total / millis.len() as f64,
                    min_ms: millis.iter().copied().fold(f64::INFINITY, f64::min),
                    max_ms: millis.iter().copied().fold(0.0, f64::max),
                };
                (operation.clone(), stats)
            })
            .collect()
    }

    /// True only when every operation's average is at or under its budget.
    pub fn check_thresholds(&self) -> bool {
        let mut all_passed = true;
        for (operation, stats) in self.report() {
            let budget = budget_ms(&operation);
            if stats.average_ms > budget {
                warn!(
                    operation = %operation,
                    average_ms = stats.average_ms,
                    budget_ms = budget,
                    "operation exceeds its latency budget"
                );
                all_passed = false;
            } else {
                debug!(
                    operation = %operation,
                    average_ms = stats.average_ms,
                    budget_ms = budget,
                    "operation within budget"
                );
            }
        }
        all_passed
    }

    /// Human-readable report, one block per operation, sorted by name.
    pub fn format_report(&self) -> String {
        let report = self.report();
        let mut operations: Vec<_> = report.iter().collect();
        operations.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::from("performance report\n==================\n");
        if operations.is_empty() {
            out.push_str("no samples recorded\n");
            return out;
        }
        for (operation, stats) in operations {
            out.push_str(&format!(
                "{}:\n  count:   {}\n  average: {:.2}ms\n  min:     {:.2}ms\n  max:     {:.2}ms\n",
                operation, stats.count, stats.average_ms, stats.min_ms, stats.max_ms
            ));
        }
        out
    }

    /// Discard all samples and pending starts.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.samples.clear();
        state.started.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop_records_a_sample() {
        let monitor = PerformanceMonitor::new();

        monitor.start("op");
        monitor.stop("op");

        let report = monitor.report();
        assert_eq!(report["op"].count, 1);
    }

    #[test]
    fn test_stop_without_start_is_a_noop() {
        let monitor = PerformanceMonitor::new();
        monitor.stop("never_started");
        assert!(monitor.report().is_empty());
    }

    #[test]
    fn test_start_overwrites_unmatched_start() {
        let monitor = PerformanceMonitor::new();

        monitor.start("op");
        monitor.start("op");
        monitor.stop("op");
        // The second stop has no pending start left.
        monitor.stop("op");

        assert_eq!(monitor.report()["op"].count, 1);
    }

    #[test]
    fn test_report_aggregates_samples() {
        let monitor = PerformanceMonitor::new();
        monitor.record("op", Duration::from_millis(10));
        monitor.record("op", Duration::from_millis(20));
        monitor.record("op", Duration::from_millis(30));

        let stats = &monitor.report()["op"];
        assert_eq!(stats.count, 3);
        assert!((stats.average_ms - 20.0).abs() < 0.001);
        assert!((stats.min_ms - 10.0).abs() < 0.001);
        assert!((stats.max_ms - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_report_separates_operations() {
        let monitor = PerformanceMonitor::new();
        monitor.record("read", Duration::from_millis(1));
        monitor.record("select", Duration::from_millis(2));

        let report = monitor.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report["read"].count, 1);
        assert_eq!(report["select"].count, 1);
    }

    #[test]
    fn test_budgets_per_operation() {
        assert_eq!(budget_ms(ops::GET_LIBRARY_DATA), 10.0);
        assert_eq!(budget_ms(ops::SELECT_ANSWER), 5.0);
        assert_eq!(budget_ms("anything_else"), 20.0);
    }

    #[test]
    fn test_check_thresholds_flags_over_budget_average() {
        let monitor = PerformanceMonitor::new();
        monitor.record(ops::GET_LIBRARY_DATA, Duration::from_millis(12));

        assert!(!monitor.check_thresholds());
    }

    #[test]
    fn test_check_thresholds_passes_within_budget() {
        let monitor = PerformanceMonitor::new();
        monitor.record(ops::GET_LIBRARY_DATA, Duration::from_millis(2));
        monitor.record(ops::SELECT_ANSWER, Duration::from_millis(1));
        monitor.record("custom_op", Duration::from_millis(19));

        assert!(monitor.check_thresholds());
    }

    #[test]
    fn test_one_bad_operation_fails_the_gate() {
        let monitor = PerformanceMonitor::new();
        monitor.record(ops::GET_LIBRARY_DATA, Duration::from_millis(2));
        monitor.record(ops::SELECT_ANSWER, Duration::from_millis(50));

        assert!(!monitor.check_thresholds());
    }

    #[test]
    fn test_check_thresholds_with_no_samples_passes() {
        let monitor = PerformanceMonitor::new();
        assert!(monitor.check_thresholds());
    }

    #[test]
    fn test_reset_discards_everything() {
        let monitor = PerformanceMonitor::new();
        monitor.record("op", Duration::from_millis(5));
        monitor.start("pending");

        monitor.reset();

        assert!(monitor.report().is_empty());
        monitor.stop("pending");
        assert!(monitor.report().is_empty());
    }

    #[test]
    fn test_format_report_lists_operations_sorted() {
        let monitor = PerformanceMonitor::new();
        monitor.record("b_op", Duration::from_millis(5));
        monitor.record("a_op", Duration::from_millis(3));

        let report = monitor.format_report();
        let a_pos = report.find("a_op").unwrap();
        let b_pos = report.find("b_op").unwrap();
        assert!(a_pos < b_pos);
        assert!(report.contains("count:   1"));
    }

    #[test]
    fn test_format_report_empty() {
        let monitor = PerformanceMonitor::new();
        assert!(monitor.format_report().contains("no samples recorded"));
    }
}
