//! Time management for the calibration timer
//!
//! The calibrator only needs intervals: when did calibration start, and how
//! long ago was that. This module provides the clock abstraction that keeps
//! the core independent of any particular timer:
//! - Monotonic system clock (when `std` is available)
//! - Hardware timers, by implementing [`TimeSource`] on the board side
//! - A manually driven clock for deterministic tests

use alloc::rc::Rc;
use core::cell::Cell;

use crate::constants::time::MS_PER_SECOND;

/// Timestamp in milliseconds since an arbitrary, fixed origin
pub type Timestamp = u64;

/// Source of monotonic time
///
/// Implementations must never go backwards. The origin is irrelevant since
/// only differences between two readings are used.
///
/// ```rust
/// use retrometer_core::time::{TimeSource, Timestamp};
///
/// struct TickTimer {
///     read_counter: fn() -> u64,
///     ticks_per_ms: u64,
/// }
///
/// impl TimeSource for TickTimer {
///     fn now(&self) -> Timestamp {
///         (self.read_counter)() / self.ticks_per_ms
///     }
/// }
/// ```
pub trait TimeSource {
    /// Current time in milliseconds
    fn now(&self) -> Timestamp;
}

/// Seconds elapsed between two timestamps, saturating at zero
pub fn elapsed_seconds(earlier: Timestamp, later: Timestamp) -> f64 {
    later.saturating_sub(earlier) as f64 / MS_PER_SECOND as f64
}

/// Monotonic system clock (requires std)
///
/// Starts at 0 when created.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Manually driven time source for testing and replay
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// calibrator and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: Rc<Cell<Timestamp>>,
}

impl FixedTime {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Rc::new(Cell::new(timestamp)),
        }
    }

    /// Jump to `timestamp`
    ///
    /// Going backwards is ignored to keep the clock monotonic.
    pub fn set(&self, timestamp: Timestamp) {
        if timestamp >= self.timestamp.get() {
            self.timestamp.set(timestamp);
        }
    }

    /// Move forward by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get().saturating_add(ms));
    }

    /// Move forward by a (possibly fractional) number of seconds
    pub fn advance_secs(&self, seconds: f64) {
        if seconds > 0.0 {
            self.advance(libm::round(seconds * MS_PER_SECOND as f64) as u64);
        }
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }
}
