//! Counter configuration
//!
//! All tuning knobs of the detection pipeline in one plain struct. Defaults
//! come from [`crate::constants`]; `with_*` methods adjust single values and
//! [`CounterConfig::validate`] checks the whole set before anything is built.
//!
//! ```rust
//! use retrometer_core::CounterConfig;
//!
//! // 1 s revolutions sampled every 50 ms, noisier sensor
//! let config = CounterConfig::default()
//!     .with_max_period_length(20)
//!     .with_min_std(50.0);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.window_len(), 200);
//! ```
//!
//! With the `serde` feature the struct can be embedded in the caller's own
//! configuration file; missing fields fall back to the defaults.

use crate::{
    constants::calibration::{
        DEFAULT_ACTIVATION_RATIO, DEFAULT_CONFIRM_DURATION_S, DEFAULT_DEACTIVATION_RATIO,
        DEFAULT_MAX_AMPLITUDE, DEFAULT_MAX_PERIOD_LENGTH, DEFAULT_MIN_AMPLITUDE,
        DEFAULT_MIN_STD, WINDOW_PERIODS,
    },
    errors::{ConfigError, CoreResult},
    trigger::HysteresisRatios,
};

/// Configuration of a [`PeriodCounter`](crate::PeriodCounter)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CounterConfig {
    /// Longest expected period in samples; the window holds ten of them
    pub max_period_length: usize,

    /// Excitation amplitude must be above this (sensor units)
    pub min_amplitude: f64,

    /// Excitation amplitude must be below this (sensor units)
    pub max_amplitude: f64,

    /// Window standard deviation must be above this (sensor units)
    pub min_std: f64,

    /// Seconds after the first excitation during which thresholds follow
    /// the range estimate
    pub calibration_confirm_duration: f64,

    /// Activation threshold as a fraction of the expected range
    pub activation_ratio: f64,

    /// Deactivation threshold as a fraction of the expected range
    pub deactivation_ratio: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            max_period_length: DEFAULT_MAX_PERIOD_LENGTH,
            min_amplitude: DEFAULT_MIN_AMPLITUDE,
            max_amplitude: DEFAULT_MAX_AMPLITUDE,
            min_std: DEFAULT_MIN_STD,
            calibration_confirm_duration: DEFAULT_CONFIRM_DURATION_S,
            activation_ratio: DEFAULT_ACTIVATION_RATIO,
            deactivation_ratio: DEFAULT_DEACTIVATION_RATIO,
        }
    }
}

impl CounterConfig {
    /// Configuration with the given detection parameters and default
    /// confirmation duration and ratios
    pub fn new(
        max_period_length: usize,
        min_amplitude: f64,
        max_amplitude: f64,
        min_std: f64,
    ) -> Self {
        Self {
            max_period_length,
            min_amplitude,
            max_amplitude,
            min_std,
            ..Self::default()
        }
    }

    /// Set the longest expected period in samples
    pub fn with_max_period_length(mut self, samples: usize) -> Self {
        self.max_period_length = samples;
        self
    }

    /// Set the open interval the excitation amplitude must fall into
    pub fn with_amplitude_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_amplitude = min;
        self.max_amplitude = max;
        self
    }

    /// Set the standard deviation floor
    pub fn with_min_std(mut self, min_std: f64) -> Self {
        self.min_std = min_std;
        self
    }

    /// Set the confirmation duration in seconds
    pub fn with_confirm_duration(mut self, seconds: f64) -> Self {
        self.calibration_confirm_duration = seconds;
        self
    }

    /// Set the hysteresis ratios
    pub fn with_ratios(mut self, activation: f64, deactivation: f64) -> Self {
        self.activation_ratio = activation;
        self.deactivation_ratio = deactivation;
        self
    }

    /// Capacity of the calibrator's sample window
    pub fn window_len(&self) -> usize {
        self.max_period_length.saturating_mul(WINDOW_PERIODS)
    }

    /// Validated hysteresis ratios
    pub fn ratios(&self) -> CoreResult<HysteresisRatios> {
        HysteresisRatios::new(self.activation_ratio, self.deactivation_ratio)
    }

    /// Check every parameter
    pub fn validate(&self) -> CoreResult<()> {
        self.ratios()?;

        if self.max_period_length == 0 {
            return Err(ConfigError::InvalidPeriodLength);
        }

        check_calibration(
            self.min_amplitude,
            self.max_amplitude,
            self.min_std,
            self.calibration_confirm_duration,
        )
    }
}

/// Checks shared by the counter configuration and the standalone calibrator
///
/// Comparisons are written so that NaN fails them.
pub(crate) fn check_calibration(
    min_amplitude: f64,
    max_amplitude: f64,
    min_std: f64,
    confirm_duration_s: f64,
) -> CoreResult<()> {
    if !(min_amplitude < max_amplitude) {
        return Err(ConfigError::InvalidAmplitudeBounds {
            min: min_amplitude,
            max: max_amplitude,
        });
    }

    if !(min_std >= 0.0) || !min_std.is_finite() {
        return Err(ConfigError::InvalidMinStd { min_std });
    }

    if !(confirm_duration_s > 0.0) || !confirm_duration_s.is_finite() {
        return Err(ConfigError::InvalidConfirmDuration {
            seconds: confirm_duration_s,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CounterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_len(), 1000);
        assert_eq!(config.calibration_confirm_duration, 86_400.0);
    }

    #[test]
    fn new_keeps_default_confirmation() {
        let config = CounterConfig::new(20, 20.0, 8000.0, 50.0);
        assert_eq!(config.window_len(), 200);
        assert_eq!(config.min_std, 50.0);
        assert_eq!(config.calibration_confirm_duration, DEFAULT_CONFIRM_DURATION_S);
    }

    #[test]
    fn rejects_swapped_ratios() {
        let config = CounterConfig::default().with_ratios(0.6, 0.9);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholdRatios { .. })
        ));
    }

    #[test]
    fn rejects_zero_period() {
        let config = CounterConfig::default().with_max_period_length(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPeriodLength));
    }

    #[test]
    fn rejects_empty_amplitude_interval() {
        let config = CounterConfig::default().with_amplitude_bounds(100.0, 100.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAmplitudeBounds { .. })
        ));

        let config = CounterConfig::default().with_amplitude_bounds(f64::NAN, 100.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_min_std() {
        assert!(CounterConfig::default().with_min_std(-1.0).validate().is_err());
        assert!(CounterConfig::default().with_min_std(f64::INFINITY).validate().is_err());
        assert!(CounterConfig::default().with_min_std(0.0).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_file() {
        let config: CounterConfig =
            serde_json::from_str(r#"{"max_period_length":20,"min_std":50.0}"#).unwrap();
        assert_eq!(config, CounterConfig::new(20, 20.0, 8000.0, 50.0));

        let swapped: CounterConfig =
            serde_json::from_str(r#"{"activation_ratio":0.5,"deactivation_ratio":0.9}"#).unwrap();
        assert!(matches!(
            swapped.validate(),
            Err(ConfigError::InvalidThresholdRatios { .. })
        ));
    }

    #[test]
    fn rejects_bad_confirm_duration() {
        for seconds in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = CounterConfig::default().with_confirm_duration(seconds);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidConfirmDuration { .. })
            ));
        }
    }
}
