//! Magnetometer-driven meter adapter
//!
//! Connects a three-axis magnetometer to a [`PeriodCounter`]. The board
//! support code implements [`Magnetometer`] for its driver; this module picks
//! the configured axis out of every fresh measurement and feeds it to the
//! counter.
//!
//! Reads are non-blocking in the `nb` style: a sensor without a new
//! measurement returns `nb::Error::WouldBlock`, and the polling loop simply
//! tries again on its next cycle.
//!
//! ```rust
//! use retrometer_core::meter::{Axis, FieldReading, Magnetometer, RetroMeter};
//! use retrometer_core::time::FixedTime;
//! use retrometer_core::CounterConfig;
//!
//! struct Replay(Vec<f64>);
//!
//! impl Magnetometer for Replay {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_field(&mut self) -> nb::Result<FieldReading, Self::Error> {
//!         let x = self.0.pop().ok_or(nb::Error::WouldBlock)?;
//!         Ok(FieldReading { x, y: 0.0, z: 0.0 })
//!     }
//! }
//!
//! let sensor = Replay(vec![300.0, -300.0, 300.0]);
//! let config = CounterConfig::default();
//! let mut meter = RetroMeter::new(sensor, Axis::X, config, FixedTime::new(0))?;
//!
//! assert_eq!(meter.poll(), Ok(0));
//! # Ok::<(), retrometer_core::ConfigError>(())
//! ```

use core::fmt;
use core::str::FromStr;

use thiserror_no_std::Error;

use crate::{
    config::CounterConfig,
    counter::PeriodCounter,
    errors::CoreResult,
    time::TimeSource,
};

/// Magnetometer axis used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X component
    #[default]
    X,
    /// Y component
    Y,
    /// Z component
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Error parsing an [`Axis`] from text
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("axis must be one of x, y, z")]
pub struct ParseAxisError;

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            _ => Err(ParseAxisError),
        }
    }
}

/// One three-axis field measurement in sensor units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldReading {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl FieldReading {
    /// Component along `axis`
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Three-axis magnetometer
pub trait Magnetometer {
    /// Bus or device error
    type Error;

    /// Read the latest measurement
    ///
    /// Returns `WouldBlock` when no new measurement is available since the
    /// previous successful read.
    fn read_field(&mut self) -> nb::Result<FieldReading, Self::Error>;
}

/// A meter channel: one magnetometer axis feeding one period counter
#[derive(Debug)]
pub struct RetroMeter<M, C> {
    magnetometer: M,
    axis: Axis,
    counter: PeriodCounter<C>,
}

impl<M, C> RetroMeter<M, C>
where
    M: Magnetometer,
    C: TimeSource,
{
    /// Create a meter counting along `axis`
    pub fn new(
        magnetometer: M,
        axis: Axis,
        config: CounterConfig,
        clock: C,
    ) -> CoreResult<Self> {
        Ok(Self {
            magnetometer,
            axis,
            counter: PeriodCounter::new(config, clock)?,
        })
    }

    /// Read one measurement if available and return the updated tick count
    ///
    /// `WouldBlock` means nothing new was recorded; sensor errors are passed
    /// through and leave the counter untouched.
    pub fn poll(&mut self) -> nb::Result<u64, M::Error> {
        let reading = self.magnetometer.read_field()?;
        self.counter.record(reading.component(self.axis));

        log_debug!(
            "Count: {}, x: {:10.3}, y: {:10.3}, z: {:10.3}",
            self.counter.count(), reading.x, reading.y, reading.z
        );

        Ok(self.counter.count())
    }

    /// Ticks counted so far
    pub fn count(&self) -> u64 {
        self.counter.count()
    }

    /// Axis feeding the counter
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The underlying period counter
    pub fn counter(&self) -> &PeriodCounter<C> {
        &self.counter
    }

    /// The magnetometer, e.g. to reconfigure the device
    pub fn magnetometer_mut(&mut self) -> &mut M {
        &mut self.magnetometer
    }

    /// Tear down the meter and hand back the magnetometer
    pub fn release(self) -> M {
        self.magnetometer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedTime;
    use alloc::collections::VecDeque;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct BusFault;

    enum Step {
        Reading(FieldReading),
        Pending,
        Fault,
    }

    struct ScriptedSensor {
        steps: VecDeque<Step>,
    }

    impl Magnetometer for ScriptedSensor {
        type Error = BusFault;

        fn read_field(&mut self) -> nb::Result<FieldReading, BusFault> {
            match self.steps.pop_front() {
                Some(Step::Reading(r)) => Ok(r),
                Some(Step::Fault) => Err(nb::Error::Other(BusFault)),
                Some(Step::Pending) | None => Err(nb::Error::WouldBlock),
            }
        }
    }

    fn z_wave(len: usize) -> impl Iterator<Item = Step> {
        (0..len).map(|i| {
            let z = if (i / 2) % 2 == 0 { 300.0 } else { -300.0 };
            Step::Reading(FieldReading { x: 1.0, y: -1.0, z })
        })
    }

    fn meter(
        steps: impl Iterator<Item = Step>,
        axis: Axis,
    ) -> RetroMeter<ScriptedSensor, FixedTime> {
        let sensor = ScriptedSensor { steps: steps.collect() };
        let config = CounterConfig::default().with_max_period_length(4);
        RetroMeter::new(sensor, axis, config, FixedTime::new(0)).unwrap()
    }

    #[test]
    fn axis_parsing() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("Y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!("w".parse::<Axis>(), Err(ParseAxisError));
    }

    #[cfg(feature = "std")]
    #[test]
    fn parse_error_converts_to_boxed_error() {
        fn axis_from_env(value: &str) -> Result<Axis, Box<dyn std::error::Error>> {
            Ok(value.parse::<Axis>()?)
        }

        assert_eq!(axis_from_env("z").unwrap(), Axis::Z);
        let err = axis_from_env("q").unwrap_err();
        assert_eq!(err.to_string(), "axis must be one of x, y, z");
    }

    #[test]
    fn axis_display_round_trips() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(axis.to_string().parse::<Axis>(), Ok(axis));
        }
    }

    #[test]
    fn reading_component() {
        let reading = FieldReading { x: 1.0, y: 2.0, z: 3.0 };
        assert_eq!(reading.component(Axis::X), 1.0);
        assert_eq!(reading.component(Axis::Y), 2.0);
        assert_eq!(reading.component(Axis::Z), 3.0);
    }

    #[test]
    fn counts_selected_axis() {
        let mut meter = meter(z_wave(80), Axis::Z);
        let mut last = 0;
        while let Ok(count) = meter.poll() {
            last = count;
        }
        assert_eq!(last, 10);
        assert_eq!(meter.count(), 10);
    }

    #[test]
    fn other_axis_stays_flat() {
        let mut meter = meter(z_wave(80), Axis::X);
        while meter.poll().is_ok() {}
        assert_eq!(meter.count(), 0);
        assert!(!meter.counter().calibrator().is_calibrated());
    }

    #[test]
    fn sensor_access_and_release() {
        let mut meter = meter(z_wave(4), Axis::Z);
        assert_eq!(meter.axis(), Axis::Z);

        // Drop the queued readings through the sensor handle
        meter.magnetometer_mut().steps.clear();
        assert_eq!(meter.poll(), Err(nb::Error::WouldBlock));

        meter.magnetometer_mut().steps.push_back(Step::Fault);
        let sensor = meter.release();
        assert_eq!(sensor.steps.len(), 1);
    }

    #[test]
    fn would_block_and_faults_skip_recording() {
        let steps = [
            Step::Pending,
            Step::Fault,
            Step::Reading(FieldReading::default()),
        ];
        let mut meter = meter(steps.into_iter(), Axis::X);

        assert_eq!(meter.poll(), Err(nb::Error::WouldBlock));
        assert_eq!(meter.poll(), Err(nb::Error::Other(BusFault)));
        assert_eq!(meter.counter().calibrator().window().len(), 0);

        assert_eq!(meter.poll(), Ok(0));
        assert_eq!(meter.counter().calibrator().window().len(), 1);
    }
}
