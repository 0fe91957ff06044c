//! Calibration and Hysteresis Parameters
//!
//! Defaults for the range calibrator and the hysteresis trigger. The values
//! match a magnetometer mounted next to the rotating indicator of a domestic
//! gas meter, sampled at 20 Hz.

use super::time::SECONDS_PER_DAY;

// ===== HYSTERESIS =====

/// Activation threshold as a fraction of the expected range.
///
/// A tick is registered when the signal climbs past 80% of the span between
/// the expected minimum and maximum.
pub const DEFAULT_ACTIVATION_RATIO: f64 = 0.8;

/// Deactivation threshold as a fraction of the expected range.
///
/// The trigger re-arms once the signal falls to 70% of the span. The 10%
/// gap to the activation ratio absorbs noise around the crossing.
pub const DEFAULT_DEACTIVATION_RATIO: f64 = 0.7;

// ===== SAMPLE WINDOW =====

/// Number of maximum-length periods the sample window spans.
///
/// Ten periods keep the 5th/95th percentiles stable even when single
/// revolutions are irregular.
pub const WINDOW_PERIODS: usize = 10;

/// Default maximum period length in samples.
///
/// 5 s revolutions at the 50 ms reference sampling interval.
pub const DEFAULT_MAX_PERIOD_LENGTH: usize = 100;

/// Lower percentile used as the robust signal minimum.
pub const LOWER_PERCENTILE: f64 = 5.0;

/// Upper percentile used as the robust signal maximum.
pub const UPPER_PERCENTILE: f64 = 95.0;

// ===== EXCITATION =====

/// Default lower bound on the excitation amplitude (sensor units).
///
/// Rejects windows where the indicator is standing still and only sensor
/// noise is visible.
pub const DEFAULT_MIN_AMPLITUDE: f64 = 20.0;

/// Default upper bound on the excitation amplitude (sensor units).
///
/// Anything larger is outside the magnetometer's plausible range and points
/// at a disturbance rather than the indicator.
pub const DEFAULT_MAX_AMPLITUDE: f64 = 8000.0;

/// Default standard deviation floor (sensor units).
pub const DEFAULT_MIN_STD: f64 = 20.0;

// ===== CONFIRMATION =====

/// Default calibration confirmation duration (seconds).
///
/// One day. For most runs this means thresholds keep following the range
/// estimate and never freeze.
pub const DEFAULT_CONFIRM_DURATION_S: f64 = SECONDS_PER_DAY as f64;

/// Progress value at which the calibration is confirmed.
pub const PROGRESS_CONFIRMED: u8 = 100;

/// Smallest progress reported once calibration has started.
pub const PROGRESS_STARTED: u8 = 1;
