//! Error Types for Counter Configuration
//!
//! ## Design Philosophy
//!
//! The detection core is pure computation: once constructed, nothing in the
//! per-sample path can fail. Every error therefore describes a configuration
//! that would make calibration silently wrong, and is reported when the
//! counter (or one of its parts) is built.
//!
//! Errors follow the same rules as the rest of the crate:
//!
//! 1. **No Heap Allocation**: all data is inline, messages are formatted on demand.
//! 2. **Copy Semantics**: errors are small and cheap to return or store.
//! 3. **Actionable Information**: each variant carries the offending values.
//!
//! ## Error Categories
//!
//! ### Hysteresis Setup
//! - `InvalidThresholdRatios`: activation ratio not above deactivation ratio
//! - `InvalidRange`: a min/max pair that cannot produce a hysteresis band
//!
//! ### Calibration Setup
//! - `InvalidPeriodLength`: zero-length sample window
//! - `InvalidAmplitudeBounds`: empty excitation amplitude interval
//! - `InvalidMinStd`: negative or non-finite standard deviation floor
//! - `InvalidConfirmDuration`: non-positive or non-finite confirmation time
//!
//! ## Example
//!
//! ```rust
//! use retrometer_core::{ConfigError, CounterConfig, PeriodCounter};
//! use retrometer_core::time::FixedTime;
//!
//! let config = CounterConfig::default().with_amplitude_bounds(500.0, 100.0);
//! match PeriodCounter::new(config, FixedTime::new(0)) {
//!     Err(ConfigError::InvalidAmplitudeBounds { min, max }) => {
//!         assert!(min >= max);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for fallible construction and configuration
pub type CoreResult<T> = Result<T, ConfigError>;

/// Configuration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Activation ratio must be strictly greater than the deactivation ratio
    #[error("Activation ratio {activation} must exceed deactivation ratio {deactivation}")]
    InvalidThresholdRatios {
        /// Fraction of the range at which the trigger activates
        activation: f64,
        /// Fraction of the range at which the trigger releases
        deactivation: f64,
    },

    /// Range handed to the trigger cannot hold a hysteresis band
    #[error("Range [{min}, {max}] cannot hold a hysteresis band")]
    InvalidRange {
        /// Expected signal minimum
        min: f64,
        /// Expected signal maximum
        max: f64,
    },

    /// Maximum period length must be at least one sample
    #[error("Max period length must be positive")]
    InvalidPeriodLength,

    /// Excitation amplitude interval is empty
    #[error("Amplitude bounds ({min}, {max}) are empty")]
    InvalidAmplitudeBounds {
        /// Lower amplitude bound (exclusive)
        min: f64,
        /// Upper amplitude bound (exclusive)
        max: f64,
    },

    /// Standard deviation floor must be a finite, non-negative number
    #[error("Minimum std {min_std} must be finite and non-negative")]
    InvalidMinStd {
        /// Rejected floor
        min_std: f64,
    },

    /// Confirmation duration must be a finite, positive number of seconds
    #[error("Calibration confirm duration {seconds}s must be finite and positive")]
    InvalidConfirmDuration {
        /// Rejected duration in seconds
        seconds: f64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidThresholdRatios { activation, deactivation } =>
                defmt::write!(fmt, "Ratio {} <= {}", activation, deactivation),
            Self::InvalidRange { min, max } =>
                defmt::write!(fmt, "Range [{}, {}] invalid", min, max),
            Self::InvalidPeriodLength =>
                defmt::write!(fmt, "Period length zero"),
            Self::InvalidAmplitudeBounds { min, max } =>
                defmt::write!(fmt, "Amplitude ({}, {}) empty", min, max),
            Self::InvalidMinStd { min_std } =>
                defmt::write!(fmt, "Min std {} invalid", min_std),
            Self::InvalidConfirmDuration { seconds } =>
                defmt::write!(fmt, "Confirm duration {}s invalid", seconds),
        }
    }
}
