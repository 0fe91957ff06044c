//! Common test utilities and signal generators for integration tests
//!
//! This module provides:
//! - Sampled sine waves the way a meter dial looks to a magnetometer
//! - Seeded noise and outlier injection
//! - A small harness that feeds a counter while advancing a fake clock

#![allow(dead_code)]

use core::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retrometer_core::constants::DEFAULT_SAMPLE_INTERVAL_MS;
use retrometer_core::time::FixedTime;
use retrometer_core::{CounterConfig, PeriodCounter};

/// Sample interval used by every scenario
pub const SAMPLE_MS: u64 = DEFAULT_SAMPLE_INTERVAL_MS;

/// `amplitude * sin(2π t / period)` sampled every `sample_time` seconds over
/// `[0, end_time]`, both ends included
pub fn sine(amplitude: f64, period: f64, end_time: f64, sample_time: f64) -> Vec<f64> {
    let n = (end_time / sample_time) as usize + 1;
    (0..n)
        .map(|i| end_time * i as f64 / (n - 1) as f64)
        .map(|t| amplitude * (2.0 * PI / period * t).sin())
        .collect()
}

/// The reference meter signal: amplitude 300, 5 s period, 60 s at 50 ms
pub fn reference_sine() -> Vec<f64> {
    sine(300.0, 5.0, 60.0, 0.05)
}

/// Add gaussian noise with standard deviation `sigma` from a seeded generator
///
/// Box-Muller over `StdRng`, one normal deviate per uniform pair.
pub fn with_gaussian_noise(signal: &[f64], sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    signal
        .iter()
        .map(|v| {
            // 1 - u keeps the log argument in (0, 1]
            let u1: f64 = 1.0 - rng.gen::<f64>();
            let u2: f64 = rng.gen();
            let normal = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            v + sigma * normal
        })
        .collect()
}

/// Scale the sample at `index` by `factor`
pub fn with_outlier(signal: &[f64], index: usize, factor: f64) -> Vec<f64> {
    let mut out = signal.to_vec();
    out[index] *= factor;
    out
}

/// A counter driven by a fake clock that advances one sample interval per
/// recorded value
pub struct Harness {
    pub clock: FixedTime,
    pub counter: PeriodCounter<FixedTime>,
}

impl Harness {
    pub fn new(config: CounterConfig) -> Self {
        let clock = FixedTime::new(0);
        let counter = PeriodCounter::new(config, clock.clone()).expect("valid config");
        Self { clock, counter }
    }

    pub fn record(&mut self, value: f64) {
        self.counter.record(value);
        self.clock.advance(SAMPLE_MS);
    }

    pub fn record_all(&mut self, values: &[f64]) -> u64 {
        for value in values {
            self.record(*value);
        }
        self.counter.count()
    }
}
