//! Self-calibrating tick detection for retrofitted utility meters
//!
//! A magnetometer strapped to a mechanical gas or water meter sees the
//! rotating dial as a roughly periodic signal of unknown amplitude and offset.
//! This crate turns that signal into a count of revolutions without any
//! per-installation tuning.
//!
//! Three parts, fed one sample at a time:
//!
//! - [`RangeCalibrator`] watches a sliding window, recognises windows that
//!   carry a real periodic signal, and widens its expected range from them.
//! - [`HysteresisTrigger`] places two thresholds in that range and emits a
//!   tick on every upward crossing.
//! - [`PeriodCounter`] wires the two together, freezes the thresholds once
//!   calibration is confirmed, and counts ticks.
//!
//! Key constraints:
//! - Runs without `std` (the window lives in one `alloc` buffer)
//! - No allocation after construction
//! - Fallible only at construction time
//!
//! ```rust
//! use retrometer_core::{CounterConfig, PeriodCounter};
//! use retrometer_core::time::FixedTime;
//!
//! let clock = FixedTime::new(0);
//! let mut counter = PeriodCounter::new(CounterConfig::default(), clock.clone())?;
//!
//! for i in 0..1200 {
//!     let t = i as f64 * 0.05;
//!     counter.record(300.0 * (2.0 * core::f64::consts::PI * t / 5.0).sin());
//!     clock.advance(50);
//! }
//!
//! assert!(counter.count() > 0);
//! # Ok::<(), retrometer_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod calibrator;
pub mod config;
pub mod constants;
pub mod counter;
pub mod errors;
pub mod meter;
pub mod stats;
pub mod time;
pub mod trigger;

// Public API
pub use calibrator::{RangeCalibrator, RangeEstimate};
pub use config::CounterConfig;
pub use counter::{CounterPhase, PeriodCounter};
pub use errors::{ConfigError, CoreResult};
pub use meter::{Axis, FieldReading, Magnetometer, ParseAxisError, RetroMeter};
pub use trigger::{HysteresisRatios, HysteresisTrigger, Thresholds, TriggerState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
