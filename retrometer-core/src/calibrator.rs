//! Sliding-window range calibrator
//!
//! ## Overview
//!
//! Estimates the range the meter signal oscillates in, so the trigger can
//! place its thresholds without manual calibration. The estimate comes from
//! the most recent `window_len` samples:
//!
//! ```text
//! window full?            ──no──▶ keep collecting
//!     │yes
//! p5, p95, std of window
//!     │
//! min_amp < |p95 - p5|/2 < max_amp
//!   and std > min_std?    ──no──▶ estimate unchanged
//!     │yes
//! min = min(min, p5), max = max(max, p95), start timer once
//! ```
//!
//! ### Percentiles
//!
//! The 5th and 95th percentile stand in for the minimum and maximum. A few
//! extreme spikes in a large window move them by at most a couple of order
//! statistics, where a raw min/max would jump straight to the spike.
//!
//! ### Monotonic widening
//!
//! The estimate only ever widens. If the real oscillation shrinks for good
//! (a weakening magnet, a sensor that moved away) the thresholds do not
//! follow and ticks may eventually be missed. This is a known limitation.
//!
//! ### Confirmation timer
//!
//! The first excitation starts a timer. Progress towards confirmation is
//! derived from the clock whenever it is asked for, so it does not depend on
//! how regularly samples arrive.

use alloc::vec::Vec;

use crate::{
    buffer::SampleWindow,
    config::{check_calibration, CounterConfig},
    constants::calibration::{PROGRESS_CONFIRMED, PROGRESS_STARTED},
    errors::{ConfigError, CoreResult},
    stats::{population_std, WindowStats},
    time::{elapsed_seconds, TimeSource, Timestamp},
};

/// Current range estimate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeEstimate {
    /// Expected signal minimum (non-increasing once set)
    pub min: f64,
    /// Expected signal maximum (non-decreasing once set)
    pub max: f64,
    /// Standard deviation of the most recent full window
    pub std: f64,
}

/// Sliding-window estimator of the signal's expected min/max
#[derive(Debug, Clone)]
pub struct RangeCalibrator<C> {
    window: SampleWindow,
    /// Sort buffer reused across samples
    scratch: Vec<f64>,
    current_min: f64,
    current_max: f64,
    current_std: f64,
    min_amplitude: f64,
    max_amplitude: f64,
    min_std: f64,
    confirm_duration_s: f64,
    started_at: Option<Timestamp>,
    clock: C,
}

impl<C: TimeSource> RangeCalibrator<C> {
    /// Create a calibrator over a window of `window_len` samples
    ///
    /// A window counts as excited when its amplitude lies strictly between
    /// `min_amplitude` and `max_amplitude` and its standard deviation is
    /// strictly above `min_std`.
    pub fn new(
        window_len: usize,
        min_amplitude: f64,
        max_amplitude: f64,
        min_std: f64,
        confirm_duration_s: f64,
        clock: C,
    ) -> CoreResult<Self> {
        if window_len == 0 {
            return Err(ConfigError::InvalidPeriodLength);
        }
        check_calibration(min_amplitude, max_amplitude, min_std, confirm_duration_s)?;

        Ok(Self {
            window: SampleWindow::with_capacity(window_len),
            scratch: Vec::with_capacity(window_len),
            current_min: f64::INFINITY,
            current_max: f64::NEG_INFINITY,
            current_std: 0.0,
            min_amplitude,
            max_amplitude,
            min_std,
            confirm_duration_s,
            started_at: None,
            clock,
        })
    }

    /// Create a calibrator sized and tuned by a counter configuration
    pub fn from_config(config: &CounterConfig, clock: C) -> CoreResult<Self> {
        config.validate()?;
        Self::new(
            config.window_len(),
            config.min_amplitude,
            config.max_amplitude,
            config.min_std,
            config.calibration_confirm_duration,
            clock,
        )
    }

    /// Feed one sample
    ///
    /// Always appends to the window. The range estimate only changes when
    /// the full window is sufficiently excited.
    pub fn input(&mut self, value: f64) {
        self.window.push(value);

        if !self.window.is_full() {
            if let Some(std) = population_std(self.window.as_slice()) {
                self.current_std = std;
            }
            return;
        }

        let Some(stats) = WindowStats::compute(self.window.as_slice(), &mut self.scratch) else {
            return;
        };
        self.current_std = stats.std;

        if !self.is_excited(&stats) {
            return;
        }

        let widened = stats.p_low < self.current_min || stats.p_high > self.current_max;
        self.current_min = self.current_min.min(stats.p_low);
        self.current_max = self.current_max.max(stats.p_high);

        if self.started_at.is_none() {
            let now = self.clock.now();
            self.started_at = Some(now);
            log_info!(
                "Calibration started at {}ms: range [{:.3}, {:.3}], std {:.3}",
                now, self.current_min, self.current_max, stats.std
            );
        } else if widened {
            log_debug!(
                "Range widened to [{:.3}, {:.3}]",
                self.current_min, self.current_max
            );
        }
    }

    /// Excitation check on a full window
    ///
    /// NaN statistics fail every comparison, so a window holding a NaN never
    /// qualifies.
    fn is_excited(&self, stats: &WindowStats) -> bool {
        let amplitude = stats.amplitude();

        self.window.is_full()
            && amplitude > self.min_amplitude
            && amplitude < self.max_amplitude
            && stats.std > self.min_std
    }

    /// Whether the window has been sufficiently excited at least once
    pub fn is_calibrated(&self) -> bool {
        self.started_at.is_some()
    }

    /// Expected (min, max) of the signal
    ///
    /// Before calibration this is `(+inf, -inf)`; check
    /// [`is_calibrated`](Self::is_calibrated) first or use
    /// [`range`](Self::range).
    pub fn expected_min_max(&self) -> (f64, f64) {
        (self.current_min, self.current_max)
    }

    /// Range estimate, `None` until calibrated
    pub fn range(&self) -> Option<RangeEstimate> {
        self.is_calibrated().then_some(RangeEstimate {
            min: self.current_min,
            max: self.current_max,
            std: self.current_std,
        })
    }

    /// Standard deviation of the window after the latest sample
    pub fn current_std(&self) -> f64 {
        self.current_std
    }

    /// Progress towards calibration confirmation, in percent
    ///
    /// 0 before the first excitation. Afterwards the elapsed fraction of the
    /// confirmation duration, floored and clamped to 1..=100.
    pub fn calibration_progress_percentage(&self) -> u8 {
        let Some(start) = self.started_at else {
            return 0;
        };

        let elapsed = elapsed_seconds(start, self.clock.now());
        let percent = libm::floor(100.0 * elapsed / self.confirm_duration_s);

        percent.clamp(PROGRESS_STARTED as f64, PROGRESS_CONFIRMED as f64) as u8
    }

    /// Whether the confirmation duration has fully elapsed
    pub fn is_confirmed(&self) -> bool {
        self.calibration_progress_percentage() >= PROGRESS_CONFIRMED
    }

    /// When the first excitation happened
    pub fn calibration_started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    /// The sample window
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// The clock driving the confirmation timer
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
