//! Whole-number validation strategy.

use crate::edit::EditRange;
use crate::error::{EditDecision, ErrorKind, Validity};
use crate::limits::{Limits, Step};
use crate::text::parse_number;
use crate::validator::{NumericValidator, StepValidator};

/// Validator for steppers that only ever hold whole numbers.
///
/// Defers to [`NumericValidator`] for bounds and the step grid, rejects any
/// decimal point while typing, and normalizes redundant leading zeros by
/// rewriting the field (`"007"` becomes `"7"`). On commit a value with a
/// decimal point is reported as off the grid, so the stepper truncates it
/// to a whole number.
///
/// The limits and step must be whole numbers; [`StepperConfig`] refuses
/// anything else for an integer-only stepper.
///
/// [`StepperConfig`]: crate::StepperConfig
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntegerValidator {
    inner: NumericValidator,
}

impl IntegerValidator {
    pub fn new(limits: Limits, step: Step) -> Self {
        Self {
            inner: NumericValidator::new(limits, step),
        }
    }

    /// Bounds first, then the whole-number grid.
    pub fn check_value(&self, value: f64) -> Validity {
        self.inner.check_value(value)?;
        if value.fract() != 0.0 {
            return Err(ErrorKind::NonMultiple);
        }
        Ok(())
    }
}

impl StepValidator for IntegerValidator {
    fn update_values(&mut self, limits: Limits, step: Step) {
        self.inner.update_values(limits, step);
    }

    fn can_step_up(&self, value: f64) -> bool {
        self.inner.can_step_up(value)
    }

    fn can_step_down(&self, value: f64) -> bool {
        self.inner.can_step_down(value)
    }

    fn check_text(&self, text: &str) -> Validity {
        let value = parse_number(text).ok_or(ErrorKind::IncorrectSymbols)?;
        self.check_value(value)?;
        if text.contains('.') {
            // "5.0": a whole number, but not in the form the field shows.
            return Err(ErrorKind::NonMultiple);
        }
        Ok(())
    }

    fn should_replace_text(
        &self,
        current: &str,
        range: EditRange,
        replacement: &str,
    ) -> EditDecision {
        if replacement.contains('.') {
            return EditDecision::Reject(ErrorKind::IncorrectSymbols);
        }

        match self.inner.should_replace_text(current, range, replacement) {
            EditDecision::Allow => {
                let new_text = range.apply(current, replacement);
                match strip_leading_zeros(&new_text) {
                    Some(normalized) => {
                        log::trace!(
                            target: "stepper.validator",
                            "rewriting {new_text:?} as {normalized:?}"
                        );
                        EditDecision::Rewrite(normalized)
                    }
                    None => EditDecision::Allow,
                }
            }
            other => other,
        }
    }
}

/// Returns the text without redundant leading zeros, or `None` if there are
/// none to strip. A lone `0` (or `-0`) is kept.
fn strip_leading_zeros(text: &str) -> Option<String> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };

    let trimmed = digits.trim_start_matches('0');
    let kept = if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    };

    (kept.len() != digits.len()).then(|| format!("{sign}{kept}"))
}
