//! Time-Related Constants
//!
//! Unit conversions and sampling intervals used by the calibration timer and
//! the reference sensor setup.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: u32 = SECONDS_PER_HOUR * HOURS_PER_DAY;

// ===== SAMPLING INTERVALS =====

/// Reference magnetometer sampling interval (milliseconds).
///
/// 20 Hz polling resolves an indicator turning at up to a few revolutions per
/// second while keeping the per-sample window statistics affordable.
///
/// Source: MMC5983MA continuous-mode deployment on a gas meter
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 50;
