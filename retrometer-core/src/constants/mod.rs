//! Constants for RetroMeter Core
//!
//! Centralized defaults for the detection pipeline. Every numeric value that
//! shapes calibration or counting lives here with a note on where it comes
//! from.
//!
//! ## Organization
//!
//! - **Calibration**: hysteresis ratios, window sizing, excitation bounds
//! - **Time**: unit conversions and sampling intervals

/// Calibration, excitation and hysteresis parameters.
pub mod calibration;

/// Time-related constants for conversions and sampling intervals.
pub mod time;

pub use calibration::{
    DEFAULT_ACTIVATION_RATIO, DEFAULT_DEACTIVATION_RATIO,
    DEFAULT_MAX_PERIOD_LENGTH, WINDOW_PERIODS,
    DEFAULT_MIN_AMPLITUDE, DEFAULT_MAX_AMPLITUDE, DEFAULT_MIN_STD,
    DEFAULT_CONFIRM_DURATION_S,
};

pub use time::{MS_PER_SECOND, SECONDS_PER_DAY, DEFAULT_SAMPLE_INTERVAL_MS};
