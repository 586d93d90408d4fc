//! Validation strategies for stepper values and text edits.
//!
//! A validator holds its own copy of the stepper's limits and step. The
//! owning [`Stepper`](crate::Stepper) pushes configuration in through
//! [`StepValidator::update_values`] whenever it changes; a validator never
//! looks at its owner, and never touches the owner's text. Every question
//! is answered from the arguments plus that configuration alone.
//!
//! Alternative strategies (integer-only, currency-aware, ...) implement
//! [`StepValidator`] and can be plugged into a stepper without changing the
//! controller. [`NumericValidator`] is the default.

use crate::edit::EditRange;
use crate::error::{EditDecision, ErrorKind, Validity};
use crate::limits::{Limits, Step};
use crate::text::{has_numeric_shape, parse_number};

/// Tolerance for the step-multiple check.
pub const ON_STEP_EPSILON: f64 = 1e-5;

/// Relative slack of the step-multiple check for large operands, in units of
/// `f64::EPSILON`.
const GRID_ULPS: f64 = 8.0;

/// The decisions a stepper delegates to its validator.
pub trait StepValidator {
    /// Replace the configuration used for every later decision.
    fn update_values(&mut self, limits: Limits, step: Step);

    /// Whether `value + step` still satisfies the maximum.
    fn can_step_up(&self, value: f64) -> bool;

    /// Whether `value - step` still satisfies the minimum.
    fn can_step_down(&self, value: f64) -> bool;

    /// Check a complete field text, as on commit.
    fn check_text(&self, text: &str) -> Validity;

    /// Decide whether replacing `range` of `current` with `replacement` may
    /// proceed while the user is typing.
    fn should_replace_text(
        &self,
        current: &str,
        range: EditRange,
        replacement: &str,
    ) -> EditDecision;
}

impl<V: StepValidator + ?Sized> StepValidator for Box<V> {
    #[inline]
    fn update_values(&mut self, limits: Limits, step: Step) {
        (**self).update_values(limits, step)
    }

    #[inline]
    fn can_step_up(&self, value: f64) -> bool {
        (**self).can_step_up(value)
    }

    #[inline]
    fn can_step_down(&self, value: f64) -> bool {
        (**self).can_step_down(value)
    }

    #[inline]
    fn check_text(&self, text: &str) -> Validity {
        (**self).check_text(text)
    }

    #[inline]
    fn should_replace_text(
        &self,
        current: &str,
        range: EditRange,
        replacement: &str,
    ) -> EditDecision {
        (**self).should_replace_text(current, range, replacement)
    }
}

/// Default validator for plain decimal input.
///
/// # Example
///
/// ```
/// use stepper_core::{
///     EditDecision, EditRange, ErrorKind, Limits, NumericValidator, Step, StepValidator,
/// };
///
/// let validator = NumericValidator::new(
///     Limits::new(Some(0.0), Some(200.0)).unwrap(),
///     Step::new(10.0).unwrap(),
/// );
///
/// assert_eq!(validator.check_text("190"), Ok(()));
/// assert_eq!(validator.check_text("195"), Err(ErrorKind::NonMultiple));
/// assert_eq!(
///     validator.should_replace_text("5", EditRange::at(1), "0"),
///     EditDecision::Allow,
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NumericValidator {
    limits: Limits,
    step: Step,
}

impl NumericValidator {
    pub fn new(limits: Limits, step: Step) -> Self {
        Self { limits, step }
    }

    #[inline]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Check a parsed value. Bound violations take priority over the
    /// step-multiple check.
    pub fn check_value(&self, value: f64) -> Validity {
        if let Some(max) = self.limits.max()
            && value > max
        {
            return Err(ErrorKind::CrossedMax);
        }
        if let Some(min) = self.limits.min()
            && value < min
        {
            return Err(ErrorKind::CrossedMin);
        }
        if !self.is_on_step(value) {
            return Err(ErrorKind::NonMultiple);
        }
        Ok(())
    }

    /// Whether `value` sits on the step grid anchored at the minimum.
    pub fn is_on_step(&self, value: f64) -> bool {
        is_on_grid(value, self.limits.anchor(), self.step)
    }
}

/// Whether `value` is a whole number of steps away from `anchor`.
///
/// `%` on floats keeps the sign of the dividend and can land just short of
/// `step` for values that are on the grid, so both ends count. The tolerance
/// is [`ON_STEP_EPSILON`], widened to a few ulps once the operands are large
/// enough that their own rounding error exceeds it; past that point a step
/// smaller than the rounding error puts every value on the grid.
///
/// # Examples
///
/// ```
/// use stepper_core::{Step, is_on_grid};
///
/// let step = Step::new(0.5).unwrap();
/// assert!(is_on_grid(2.5, 0.0, step));
/// assert!(!is_on_grid(2.7, 0.0, step));
/// assert!(is_on_grid(1e14 + 0.5, 0.0, step));
/// assert!(!is_on_grid(1e14 + 0.25, 0.0, step));
/// ```
pub fn is_on_grid(value: f64, anchor: f64, step: Step) -> bool {
    let step = step.get();
    let tolerance = grid_tolerance(value, anchor);
    let remainder = ((value - anchor) % step).abs();
    remainder < tolerance || step - remainder < tolerance
}

/// Distance below which two values near `value` count as the same grid
/// position.
pub(crate) fn grid_tolerance(value: f64, anchor: f64) -> f64 {
    ON_STEP_EPSILON.max(value.abs().max(anchor.abs()) * GRID_ULPS * f64::EPSILON)
}

impl StepValidator for NumericValidator {
    fn update_values(&mut self, limits: Limits, step: Step) {
        self.limits = limits;
        self.step = step;
    }

    fn can_step_up(&self, value: f64) -> bool {
        self.limits
            .max()
            .is_none_or(|max| value + self.step.get() <= max)
    }

    fn can_step_down(&self, value: f64) -> bool {
        self.limits
            .min()
            .is_none_or(|min| value - self.step.get() >= min)
    }

    fn check_text(&self, text: &str) -> Validity {
        let value = parse_number(text).ok_or(ErrorKind::IncorrectSymbols)?;
        self.check_value(value)
    }

    fn should_replace_text(
        &self,
        current: &str,
        range: EditRange,
        replacement: &str,
    ) -> EditDecision {
        let new_text = range.apply(current, replacement);

        let decision = if new_text.is_empty() {
            EditDecision::Allow
        } else if !has_numeric_shape(&new_text) {
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        } else if let Some(value) = parse_number(&new_text) {
            // Minimum and step are only enforced on commit: "1" on the way to
            // "15" is below a minimum of 10.
            match self.limits.max() {
                Some(max) if value > max => EditDecision::Reject(ErrorKind::CrossedMax),
                _ => EditDecision::Allow,
            }
        } else if new_text == "-" {
            EditDecision::Allow
        } else {
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        };

        log::trace!(
            target: "stepper.validator",
            "edit {current:?} -> {new_text:?}: {decision:?}"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(min: Option<f64>, max: Option<f64>, step: f64) -> NumericValidator {
        NumericValidator::new(Limits::new(min, max).unwrap(), Step::new(step).unwrap())
    }

    fn edit(v: &NumericValidator, current: &str, at: usize, typed: &str) -> EditDecision {
        v.should_replace_text(current, EditRange::at(at), typed)
    }

    #[test]
    fn step_up_respects_max() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert!(v.can_step_up(190.0));
        assert!(!v.can_step_up(195.0));
        assert!(!v.can_step_up(200.0));
    }

    #[test]
    fn step_down_respects_min() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert!(v.can_step_down(10.0));
        assert!(!v.can_step_down(5.0));
        assert!(!v.can_step_down(0.0));
    }

    #[test]
    fn open_bounds_always_allow_stepping() {
        let v = validator(None, None, 10.0);
        assert!(v.can_step_up(f64::MAX / 2.0));
        assert!(v.can_step_down(-1e12));
    }

    #[test]
    fn check_text_orders_bound_checks_before_step() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert_eq!(v.check_text("205"), Err(ErrorKind::CrossedMax));
        assert_eq!(v.check_text("-5"), Err(ErrorKind::CrossedMin));
        assert_eq!(v.check_text("105"), Err(ErrorKind::NonMultiple));
        assert_eq!(v.check_text("200"), Ok(()));
        assert_eq!(v.check_text("0"), Ok(()));
    }

    #[test]
    fn check_text_rejects_non_numbers() {
        let v = validator(None, None, 1.0);
        assert_eq!(v.check_text(""), Err(ErrorKind::IncorrectSymbols));
        assert_eq!(v.check_text("-"), Err(ErrorKind::IncorrectSymbols));
        assert_eq!(v.check_text("12a"), Err(ErrorKind::IncorrectSymbols));
        assert_eq!(v.check_text("1e2"), Err(ErrorKind::IncorrectSymbols));
    }

    #[test]
    fn step_grid_is_anchored_at_min() {
        let v = validator(Some(3.0), None, 5.0);
        assert_eq!(v.check_value(8.0), Ok(()));
        assert_eq!(v.check_value(10.0), Err(ErrorKind::NonMultiple));
        assert_eq!(v.check_value(-2.0), Err(ErrorKind::CrossedMin));
    }

    #[test]
    fn fractional_steps_tolerate_float_noise() {
        let v = validator(Some(0.0), Some(1.0), 0.1);
        assert_eq!(v.check_value(0.1 + 0.2), Ok(()));
        assert_eq!(v.check_value(0.7), Ok(()));
        assert_eq!(v.check_value(0.75), Err(ErrorKind::NonMultiple));
    }

    #[test]
    fn negative_offsets_are_on_step() {
        let v = validator(None, None, 0.5);
        assert_eq!(v.check_value(-2.5), Ok(()));
        assert_eq!(v.check_value(-2.25), Err(ErrorKind::NonMultiple));
    }

    #[test]
    fn keystroke_appending_digit_under_max_is_allowed() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert_eq!(edit(&v, "5", 1, "0"), EditDecision::Allow);
    }

    #[test]
    fn keystroke_over_max_is_rejected() {
        let v = validator(None, Some(20.0), 1.0);
        assert_eq!(
            edit(&v, "19", 2, "9"),
            EditDecision::Reject(ErrorKind::CrossedMax)
        );
    }

    #[test]
    fn lone_minus_is_allowed() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert_eq!(edit(&v, "", 0, "-"), EditDecision::Allow);
    }

    #[test]
    fn letters_are_rejected() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert_eq!(
            edit(&v, "5", 1, "a"),
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        );
    }

    #[test]
    fn clearing_the_field_is_allowed() {
        let v = validator(Some(10.0), Some(20.0), 1.0);
        let decision = v.should_replace_text("15", EditRange::all("15"), "");
        assert_eq!(decision, EditDecision::Allow);
    }

    #[test]
    fn min_and_step_are_not_checked_while_typing() {
        let v = validator(Some(10.0), Some(20.0), 5.0);
        // "1" on the way to "15".
        assert_eq!(edit(&v, "", 0, "1"), EditDecision::Allow);
        // "13" is off-step but still under construction.
        assert_eq!(edit(&v, "1", 1, "3"), EditDecision::Allow);
    }

    #[test]
    fn lone_dot_and_double_sign_are_rejected() {
        let v = validator(None, None, 1.0);
        assert_eq!(
            edit(&v, "", 0, "."),
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        );
        assert_eq!(
            edit(&v, "-", 1, "-"),
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        );
        assert_eq!(
            edit(&v, "1.5", 3, "."),
            EditDecision::Reject(ErrorKind::IncorrectSymbols)
        );
    }

    #[test]
    fn negative_zero_is_permitted_mid_edit() {
        let v = validator(Some(0.0), Some(10.0), 1.0);
        assert_eq!(edit(&v, "-", 1, "0"), EditDecision::Allow);
    }

    #[test]
    fn replacing_a_selection_is_checked_as_a_whole() {
        let v = validator(Some(0.0), Some(200.0), 10.0);
        assert_eq!(
            v.should_replace_text("190", EditRange::new(0, 1), "9"),
            EditDecision::Reject(ErrorKind::CrossedMax)
        );
        assert_eq!(
            v.should_replace_text("190", EditRange::new(0, 1), ""),
            EditDecision::Allow
        );
    }

    #[test]
    fn update_values_replaces_configuration() {
        let mut v = validator(Some(0.0), Some(10.0), 1.0);
        assert_eq!(v.check_text("15"), Err(ErrorKind::CrossedMax));

        v.update_values(Limits::new(Some(0.0), Some(20.0)).unwrap(), Step::new(5.0).unwrap());
        assert_eq!(v.check_text("15"), Ok(()));
        assert_eq!(v.step().get(), 5.0);
        assert_eq!(v.limits().max(), Some(20.0));
    }
}
