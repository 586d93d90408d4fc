//! Range and step configuration.

use crate::error::ConfigError;

/// Inclusive bounds on the stepper value. Either side may be open.
///
/// Constructed through [`Limits::new`], which guarantees both bounds are
/// finite and `min <= max` when both are present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Limits {
    min: Option<f64>,
    max: Option<f64>,
}

impl Limits {
    /// Validate and build a pair of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepper_core::Limits;
    ///
    /// assert!(Limits::new(Some(0.0), Some(200.0)).is_ok());
    /// assert!(Limits::new(None, Some(-5.0)).is_ok());
    /// assert!(Limits::new(Some(10.0), Some(1.0)).is_err());
    /// ```
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, ConfigError> {
        for bound in [min, max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ConfigError::NonFiniteLimit(bound));
            }
        }
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(ConfigError::InvertedLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// No bound in either direction.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    #[inline]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Origin of the step grid: the minimum, or zero when unbounded below.
    #[inline]
    pub fn anchor(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }
}

/// Positive, finite step size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step(f64);

impl Step {
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if step.is_finite() && step > 0.0 {
            Ok(Self(step))
        } else {
            Err(ConfigError::InvalidStep(step))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Step {
    fn default() -> Self {
        Self(1.0)
    }
}
