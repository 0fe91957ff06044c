//! Hysteresis edge detector
//!
//! Turns a continuous signal into discrete events using two thresholds
//! derived from the expected signal range:
//!
//! ```text
//!  max ─────────────────────────────────────
//!  activation   (min + 0.8·span)  Idle → Activated, tick
//!  deactivation (min + 0.7·span)  Activated → Idle
//!  min ─────────────────────────────────────
//! ```
//!
//! A tick is emitted only on the Idle → Activated transition. Noise that
//! wiggles around the activation threshold cannot produce a second tick
//! until the signal has dropped all the way to the deactivation threshold.

use crate::{
    constants::calibration::{DEFAULT_ACTIVATION_RATIO, DEFAULT_DEACTIVATION_RATIO},
    errors::{ConfigError, CoreResult},
};

/// Activation state of the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerState {
    /// Waiting for the signal to reach the activation threshold
    #[default]
    Idle,
    /// Above the band; waiting for the signal to fall back
    Activated,
}

/// Threshold positions as fractions of the expected range
///
/// The activation ratio is always strictly greater than the deactivation
/// ratio; [`HysteresisRatios::new`] refuses anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRatios"))]
pub struct HysteresisRatios {
    activation: f64,
    deactivation: f64,
}

/// Unchecked wire form, validated through [`HysteresisRatios::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRatios {
    activation: f64,
    deactivation: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRatios> for HysteresisRatios {
    type Error = ConfigError;

    fn try_from(raw: RawRatios) -> CoreResult<Self> {
        Self::new(raw.activation, raw.deactivation)
    }
}

impl HysteresisRatios {
    /// Validate and build a ratio pair
    pub fn new(activation: f64, deactivation: f64) -> CoreResult<Self> {
        // Negated comparison so NaN ratios are rejected too
        if !(activation > deactivation) {
            return Err(ConfigError::InvalidThresholdRatios {
                activation,
                deactivation,
            });
        }
        Ok(Self {
            activation,
            deactivation,
        })
    }

    /// Fraction of the range at which the trigger activates
    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// Fraction of the range at which the trigger releases
    pub fn deactivation(&self) -> f64 {
        self.deactivation
    }
}

impl Default for HysteresisRatios {
    fn default() -> Self {
        Self {
            activation: DEFAULT_ACTIVATION_RATIO,
            deactivation: DEFAULT_DEACTIVATION_RATIO,
        }
    }
}

/// Absolute thresholds in signal units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Idle → Activated when the signal is at or above this value
    pub activation: f64,
    /// Activated → Idle once the signal is no longer above this value
    pub deactivation: f64,
}

/// Two-state hysteresis trigger
///
/// Unconfigured until [`configure`](Self::configure) succeeds at least once;
/// an unconfigured trigger ignores its input.
#[derive(Debug, Clone)]
pub struct HysteresisTrigger {
    ratios: HysteresisRatios,
    thresholds: Option<Thresholds>,
    state: TriggerState,
}

impl HysteresisTrigger {
    /// Create an unconfigured trigger
    pub fn new(ratios: HysteresisRatios) -> Self {
        Self {
            ratios,
            thresholds: None,
            state: TriggerState::Idle,
        }
    }

    /// Place the thresholds inside the expected range `[min, max]`
    ///
    /// A range that cannot hold a hysteresis band (`max <= min`, or any
    /// non-finite bound) is rejected and the previous thresholds stay in
    /// place. The activation state is kept across reconfiguration.
    pub fn configure(&mut self, min: f64, max: f64) -> CoreResult<()> {
        let span = max - min;
        let thresholds = Thresholds {
            activation: min + self.ratios.activation * span,
            deactivation: min + self.ratios.deactivation * span,
        };

        if !min.is_finite()
            || !max.is_finite()
            || !(thresholds.activation > thresholds.deactivation)
        {
            return Err(ConfigError::InvalidRange { min, max });
        }

        self.thresholds = Some(thresholds);
        Ok(())
    }

    /// Feed one sample; returns `true` exactly on an Idle → Activated edge
    pub fn input(&mut self, value: f64) -> bool {
        let Some(thresholds) = self.thresholds else {
            return false;
        };

        match self.state {
            TriggerState::Idle => {
                if value >= thresholds.activation {
                    self.state = TriggerState::Activated;
                    true
                } else {
                    false
                }
            }
            TriggerState::Activated => {
                // Stays up only while strictly above; NaN releases
                if !(value > thresholds.deactivation) {
                    self.state = TriggerState::Idle;
                }
                false
            }
        }
    }

    /// Whether thresholds have been set
    pub fn is_configured(&self) -> bool {
        self.thresholds.is_some()
    }

    /// Current thresholds, if configured
    pub fn thresholds(&self) -> Option<Thresholds> {
        self.thresholds
    }

    /// Current activation state
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Ratios the thresholds are derived from
    pub fn ratios(&self) -> HysteresisRatios {
        self.ratios
    }
}

impl Default for HysteresisTrigger {
    fn default() -> Self {
        Self::new(HysteresisRatios::default())
    }
}
