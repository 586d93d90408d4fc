//! TOML configuration for a stepper.
//!
//! ```toml
//! min = 0
//! max = 200
//! step = 10
//! value = 190
//! integer_only = false
//!
//! [repeat]
//! delay_ms = 400
//! interval_ms = 80
//! ```
//!
//! Every key is optional. The step defaults to 1 and the value to the
//! minimum (or zero).

use crate::error::ConfigError;
use crate::integer::IntegerValidator;
use crate::limits::{Limits, Step};
use crate::stepper::Stepper;
use crate::validator::{NumericValidator, StepValidator};
use serde::Deserialize;

/// A stepper whose validation strategy is chosen at runtime.
pub type DynStepper = Stepper<Box<dyn StepValidator>>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StepperConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub value: Option<f64>,
    /// Use [`IntegerValidator`] instead of [`NumericValidator`].
    pub integer_only: bool,
    pub repeat: RepeatConfig,
}

/// Timing of the press-and-hold repeat for step buttons.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RepeatConfig {
    /// Time a button must be held before the first repeat tick.
    pub delay_ms: u64,
    /// Time between repeat ticks after the first.
    pub interval_ms: u64,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            delay_ms: 400,
            interval_ms: 80,
        }
    }
}

impl StepperConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        log::debug!(target: "stepper.config", "loaded {config:?}");
        Ok(config)
    }

    pub fn limits(&self) -> Result<Limits, ConfigError> {
        Limits::new(self.min, self.max)
    }

    pub fn step(&self) -> Result<Step, ConfigError> {
        self.step.map_or(Ok(Step::default()), Step::new)
    }

    /// Check the limits, the step and the initial value.
    ///
    /// An integer-only stepper also needs whole-number limits and step, or
    /// its grid would hold values it can never display. A fractional initial
    /// value is fine; it is truncated onto the grid when the stepper is
    /// built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits()?;
        self.step()?;
        if let Some(value) = self.value
            && !value.is_finite()
        {
            return Err(ConfigError::NonFiniteValue(value));
        }

        if self.integer_only {
            let keys = [("min", self.min), ("max", self.max), ("step", self.step)];
            for (key, value) in keys {
                if let Some(value) = value
                    && value.fract() != 0.0
                {
                    return Err(ConfigError::NotWholeNumber { key, value });
                }
            }
        }
        Ok(())
    }

    /// Build a stepper with the configured validator, limits, step and
    /// initial value. The initial value is reconciled before any observer is
    /// attached, so an out-of-range value is corrected silently.
    pub fn build(&self) -> Result<DynStepper, ConfigError> {
        self.validate()?;
        let limits = self.limits()?;
        let step = self.step()?;

        let validator: Box<dyn StepValidator> = if self.integer_only {
            Box::new(IntegerValidator::default())
        } else {
            Box::new(NumericValidator::default())
        };

        let mut stepper = Stepper::with_validator(validator, limits, step);
        if let Some(value) = self.value {
            stepper.set_value(value);
        }
        Ok(stepper)
    }
}
