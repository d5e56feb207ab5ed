//! Refresh policy per display-surface size class.

use std::str::FromStr;
use std::time::Duration;

/// Coarse display-surface size category driving refresh cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Spacing between timeline entries for this size class.
    ///
    /// Smaller surfaces show less text and a refresh disrupts them more per
    /// character displayed, so they update on a coarser cadence.
    pub fn refresh_interval(&self) -> Duration {
        match self {
            SizeClass::Small => Duration::from_secs(30),
            SizeClass::Medium => Duration::from_secs(15),
            SizeClass::Large => Duration::from_secs(10),
        }
    }
}

impl FromStr for SizeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(SizeClass::Small),
            "medium" => Ok(SizeClass::Medium),
            "large" => Ok(SizeClass::Large),
            other => Err(format!(
                "unknown size class '{other}', expected small, medium, or large"
            )),
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeClass::Small => write!(f, "small"),
            SizeClass::Medium => write!(f, "medium"),
            SizeClass::Large => write!(f, "large"),
        }
    }
}
