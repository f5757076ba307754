//! Request generations.
//!
//! Each channel owns a [`GenerationClock`]. Every state-changing trigger
//! advances it and tags the request it issues with the new [`Generation`];
//! a completion is applied only while its generation is still the clock's
//! current one. Stale completions are dropped rather than cancelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Channel-scoped request token. `Generation::ZERO` means "nothing issued".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation of a channel that has never issued a request.
    pub const ZERO: Generation = Generation(0);

    /// Raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Monotonic generation counter for one channel.
///
/// Clones share the same counter.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
    current: Arc<AtomicU64>,
}

impl GenerationClock {
    /// Creates a clock at [`Generation::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates and returns the next generation.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
    }

    /// The most recently allocated generation.
    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::Acquire))
    }

    /// Whether `generation` is still the latest one.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }
}
