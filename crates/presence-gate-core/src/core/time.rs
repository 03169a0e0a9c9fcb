// crates/presence-gate-core/src/core/time.rs
// ============================================================================
// Module: Presence Gate Time Model
// Description: Monotonic time values and clock sources for timeout tracking.
// Purpose: Keep the gate free of direct wall-clock reads for deterministic tests.
// Dependencies: serde, std
// ============================================================================

//! ## Overview
//! The gate never reads wall-clock time directly; a [`Clock`] supplies
//! monotonic instants so hosts and tests control time explicitly. Timeout
//! arithmetic is saturating and millisecond-granular, which is sufficient for
//! the 100 ms watchdog tick.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Monotonic Time
// ============================================================================

/// Monotonic instant in milliseconds since an arbitrary per-clock origin.
///
/// # Invariants
/// - Values from the same [`Clock`] are mutually comparable; values from
///   different clocks are not.
/// - Values never decrease for a well-behaved clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonotonicTime(u64);

impl MonotonicTime {
    /// Creates a monotonic instant from milliseconds since the clock origin.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the instant as milliseconds since the clock origin.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the milliseconds elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub const fn saturating_millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

// ============================================================================
// SECTION: Clock Sources
// ============================================================================

/// Source of monotonic instants for timeout tracking.
pub trait Clock: Send + Sync {
    /// Returns the current monotonic instant.
    fn now(&self) -> MonotonicTime;
}

/// Clock backed by [`std::time::Instant`].
///
/// # Invariants
/// - The origin is fixed at construction; all readings are relative to it.
#[derive(Debug)]
pub struct SystemClock {
    /// Origin instant captured at construction.
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> MonotonicTime {
        let elapsed = self.origin.elapsed().as_millis();
        MonotonicTime::from_millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}
