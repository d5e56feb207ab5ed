//! The library payload record written by the producer.

use serde::{Deserialize, Serialize};

/// A named, ordered collection of candidate answer strings.
///
/// This is the exact shape the producer delivers and the store carries as a
/// single JSON blob. A payload with no answers is accepted at write time and
/// surfaces as invalid only when something tries to select from it; `answers`
/// therefore defaults to empty rather than failing deserialization when the
/// producer omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryPayload {
    /// Producer-assigned library id (e.g. "mao_zedong")
    pub id: String,
    /// Human-readable library name shown next to each answer
    pub name: String,
    /// Ordered candidate answers; empty means the payload is not selectable
    #[serde(default)]
    pub answers: Vec<String>,
}

impl LibraryPayload {
    /// Create a new payload.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        answers: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            answers,
        }
    }

    /// True when the payload can actually produce an answer.
    pub fn is_valid(&self) -> bool {
        !self.answers.is_empty()
    }
}
