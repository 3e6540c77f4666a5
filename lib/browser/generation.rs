//! Generation tokens used to recognise stale navigation results.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one navigation request on a pane. Later requests have larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out generations for a single pane and remembers the most recent one.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: AtomicU64,
}

impl GenerationCounter {
    /// Start a new generation, invalidating all earlier ones.
    pub fn advance(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `generation` is still the most recent one.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }
}
