//! Period counter
//!
//! Wires the range calibrator into the hysteresis trigger and counts the
//! trigger's rising edges. One counter serves one meter channel; channels
//! never share state.
//!
//! ## Per-sample flow
//!
//! ```text
//! record(value)
//!   ├─ calibrator.input(value)
//!   ├─ calibrated and progress < 100%?  ─yes─▶ trigger.configure(min, max)
//!   └─ trigger.input(value) ─tick─▶ count += 1
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Warm-up**: the window is filling or not yet excited. The trigger is
//!    unconfigured and nothing is counted. Ticks during warm-up are lost.
//! 2. **Calibrating**: every sample may widen the range, and the trigger
//!    thresholds follow it.
//! 3. **Confirmed**: once the confirmation duration has elapsed the
//!    thresholds freeze at their last values, even if the calibrator keeps
//!    widening its estimate.
//!
//! ## Example
//!
//! ```rust
//! use retrometer_core::{CounterConfig, PeriodCounter};
//! use retrometer_core::time::FixedTime;
//!
//! let config = CounterConfig::default().with_max_period_length(2);
//! let mut counter = PeriodCounter::new(config, FixedTime::new(0))?;
//!
//! for i in 0..60 {
//!     let value = if (i / 2) % 2 == 0 { 300.0 } else { -300.0 };
//!     counter.record(value);
//! }
//!
//! assert!(counter.count() > 0);
//! # Ok::<(), retrometer_core::ConfigError>(())
//! ```

use crate::{
    calibrator::RangeCalibrator,
    config::CounterConfig,
    constants::calibration::PROGRESS_CONFIRMED,
    errors::CoreResult,
    time::TimeSource,
    trigger::{HysteresisTrigger, Thresholds},
};

/// Calibration phase of a counter, derived from the calibrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterPhase {
    /// No sufficiently excited window seen yet
    WarmingUp,
    /// Thresholds follow the range estimate
    Calibrating {
        /// Confirmation progress, 1..=99
        progress: u8,
    },
    /// Thresholds are frozen
    Confirmed,
}

/// Counts signal periods of one meter channel
#[derive(Debug, Clone)]
pub struct PeriodCounter<C> {
    calibrator: RangeCalibrator<C>,
    trigger: HysteresisTrigger,
    count: u64,
    frozen: bool,
}

impl<C: TimeSource> PeriodCounter<C> {
    /// Build a counter from a validated configuration
    pub fn new(config: CounterConfig, clock: C) -> CoreResult<Self> {
        config.validate()?;

        Ok(Self {
            calibrator: RangeCalibrator::from_config(&config, clock)?,
            trigger: HysteresisTrigger::new(config.ratios()?),
            count: 0,
            frozen: false,
        })
    }

    /// Feed one sample
    ///
    /// Samples are not sanitized. A NaN stays in the calibrator's window for
    /// a full window length and blocks calibration updates until it is
    /// evicted; infinities are treated as extreme values. Filter them out
    /// upstream if the sensor can produce them.
    pub fn record(&mut self, value: f64) {
        self.calibrator.input(value);

        let progress = self.calibrator.calibration_progress_percentage();
        if self.calibrator.is_calibrated() && progress < PROGRESS_CONFIRMED {
            let (min, max) = self.calibrator.expected_min_max();
            if let Err(e) = self.trigger.configure(min, max) {
                log_warn!("Trigger kept previous thresholds: {}", e);
            }
        } else if progress >= PROGRESS_CONFIRMED && !self.frozen {
            self.frozen = true;
            if let Some(thresholds) = self.trigger.thresholds() {
                log_info!(
                    "Calibration confirmed, thresholds frozen at {:.3}/{:.3}",
                    thresholds.activation, thresholds.deactivation
                );
            }
        }

        if self.trigger.input(value) {
            self.count += 1;
            log_debug!("Tick {} at value {:.3}", self.count, value);
        }
    }

    /// Number of periods counted so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Calibration phase at the current time
    pub fn phase(&self) -> CounterPhase {
        if !self.calibrator.is_calibrated() {
            return CounterPhase::WarmingUp;
        }

        match self.calibrator.calibration_progress_percentage() {
            progress if progress >= PROGRESS_CONFIRMED => CounterPhase::Confirmed,
            progress => CounterPhase::Calibrating { progress },
        }
    }

    /// Thresholds currently used for counting
    pub fn thresholds(&self) -> Option<Thresholds> {
        self.trigger.thresholds()
    }

    /// The range calibrator, for diagnostics
    pub fn calibrator(&self) -> &RangeCalibrator<C> {
        &self.calibrator
    }

    /// The hysteresis trigger, for diagnostics
    pub fn trigger(&self) -> &HysteresisTrigger {
        &self.trigger
    }
}
