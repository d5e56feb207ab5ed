//! Deterministic, time-seeded answer selection.
//!
//! Selection is a pure function of (payload, instant): repeated reads at the
//! same instant are reproducible, and the answer changes as time advances.
//! The tick rate `K` decides the novelty granularity: two selections less
//! than `1/K` seconds apart return the same answer, selections spaced
//! further apart usually differ. This is a hash of time, not randomness.
//!
//! Each call purpose has its own fixed rate. Snapshot previews use
//! [`SNAPSHOT_TICKS_PER_SEC`]; timeline generation uses
//! [`TIMELINE_TICKS_PER_SEC`], which matches the scheduler's coarser
//! entry spacing.

use crate::library::LibraryPayload;
use chrono::{DateTime, Utc};

/// Tick rate for snapshot reads (millisecond epoch).
pub const SNAPSHOT_TICKS_PER_SEC: i64 = 1000;

/// Tick rate for timeline entry generation (100 ms epoch).
pub const TIMELINE_TICKS_PER_SEC: i64 = 10;

/// Text shown when no answer can be selected.
pub const FALLBACK_ANSWER: &str = "no answer available";

/// Library name shown when no answer can be selected.
pub const FALLBACK_LIBRARY: &str = "unknown library";

/// One selected answer paired with its library's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAnswer {
    pub text: String,
    pub library_name: String,
}

impl SelectedAnswer {
    /// The fixed sentinel returned when no valid payload exists.
    ///
    /// The rendering layer has no recovery path, so selection degrades to
    /// this pair instead of failing.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_ANSWER.to_string(),
            library_name: FALLBACK_LIBRARY.to_string(),
        }
    }
}

/// Pick one answer from `payload` for the instant `at`.
///
/// The index is `floor(epoch_seconds * ticks_per_second) mod answer_count`.
/// An absent payload or one with no answers yields
/// [`SelectedAnswer::fallback`]; this function never fails.
pub fn select(
    payload: Option<&LibraryPayload>,
    at: DateTime<Utc>,
    ticks_per_second: i64,
) -> SelectedAnswer {
    let Some(payload) = payload else {
        return SelectedAnswer::fallback();
    };
    if payload.answers.is_empty() {
        return SelectedAnswer::fallback();
    }

    let ticks = at.timestamp_millis() * ticks_per_second / 1000;
    let index = ticks.rem_euclid(payload.answers.len() as i64) as usize;

    SelectedAnswer {
        text: payload.answers[index].clone(),
        library_name: payload.name.clone(),
    }
}
