//! The stepper controller.
//!
//! [`Stepper`] owns the field text (the canonical form of the value), the
//! limits and step, the acceleration counter and the interaction phase. It
//! asks its validator for every decision, applies the verdict to its own
//! state, and reports errors to an optional observer.
//!
//! Every mutation other than a live keystroke ends in a reconciliation pass
//! ([`Stepper::reconcile`]) which restores limit/step consistency with at
//! most one corrective action.

use crate::edit::EditRange;
use crate::error::{ConfigError, EditDecision, ErrorKind};
use crate::limits::{Limits, Step};
use crate::state::{Direction, Phase};
use crate::text::{format_exact, format_value, parse_number};
use crate::validator::{NumericValidator, StepValidator, grid_tolerance, is_on_grid};
use std::fmt;

/// Cap on the step multiplier reached by holding a step button.
pub const MAX_ACCELERATION: u32 = 10;

/// Receives stepper notifications, synchronously, from inside the call that
/// produced them.
///
/// Any `FnMut(ErrorKind)` closure is an observer that ignores value changes.
pub trait StepperObserver {
    /// An operation detected an invalid value or rejected a keystroke.
    fn on_error(&mut self, kind: ErrorKind);

    /// The committed value changed. Not called for keystrokes while editing;
    /// the edited value is reported once editing ends.
    fn on_value_changed(&mut self, _value: f64) {}
}

impl<F: FnMut(ErrorKind)> StepperObserver for F {
    fn on_error(&mut self, kind: ErrorKind) {
        self(kind)
    }
}

/// What happened to a keystroke handed to [`Stepper::on_keystroke`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// The edit was applied as typed.
    Accepted,
    /// The edit was discarded and the error reported.
    Rejected(ErrorKind),
    /// The edit was discarded and the field text replaced with this text.
    Rewritten(String),
}

impl KeystrokeOutcome {
    /// Whether the host should apply the keystroke as typed.
    #[inline]
    pub fn accepted(&self) -> bool {
        matches!(self, KeystrokeOutcome::Accepted)
    }
}

/// A numeric stepper: a text field with increment and decrement actions,
/// bounded by [`Limits`] and snapped to a [`Step`] grid.
///
/// # Example
///
/// ```
/// use stepper_core::{ErrorKind, Limits, Step, Stepper};
///
/// let mut stepper = Stepper::new(
///     Limits::new(Some(0.0), Some(200.0)).unwrap(),
///     Step::new(10.0).unwrap(),
/// )
/// .with_value(190.0);
///
/// assert_eq!(stepper.step_up(), None);
/// assert_eq!(stepper.text(), "200");
///
/// assert_eq!(stepper.step_up(), Some(ErrorKind::CrossedMax));
/// assert_eq!(stepper.value(), Some(200.0));
/// ```
pub struct Stepper<V = NumericValidator> {
    text: String,
    limits: Limits,
    step: Step,
    validator: V,
    acceleration: u32,
    phase: Phase,
    can_step_up: bool,
    can_step_down: bool,
    /// Last value reported through `on_value_changed`.
    committed: Option<f64>,
    observer: Option<Box<dyn StepperObserver>>,
}

impl Stepper<NumericValidator> {
    /// Create a stepper with the default validator. The value starts at the
    /// minimum, or zero when unbounded below.
    pub fn new(limits: Limits, step: Step) -> Self {
        Self::with_validator(NumericValidator::default(), limits, step)
    }
}

impl<V: StepValidator> Stepper<V> {
    /// Create a stepper driven by a custom validation strategy.
    pub fn with_validator(mut validator: V, limits: Limits, step: Step) -> Self {
        validator.update_values(limits, step);

        let text = format_exact(limits.anchor());
        let committed = parse_number(&text);
        let mut stepper = Self {
            text,
            limits,
            step,
            validator,
            acceleration: 1,
            phase: Phase::Idle,
            can_step_up: true,
            can_step_down: true,
            committed,
            observer: None,
        };
        stepper.refresh_step_state();
        stepper
    }

    /// Builder form of [`Stepper::set_value`].
    pub fn with_value(mut self, value: f64) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_observer(&mut self, observer: impl StepperObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    /// The field text, which is the canonical form of the value.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The value parsed from the field text, or `None` while the text is not
    /// a number (e.g. empty or a lone `-` during editing).
    pub fn value(&self) -> Option<f64> {
        parse_number(&self.text)
    }

    #[inline]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn validator(&self) -> &V {
        &self.validator
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Current step multiplier, between 1 and [`MAX_ACCELERATION`].
    #[inline]
    pub fn acceleration(&self) -> u32 {
        self.acceleration
    }

    /// Whether the increment action should be enabled.
    #[inline]
    pub fn can_step_up(&self) -> bool {
        self.can_step_up
    }

    /// Whether the decrement action should be enabled.
    #[inline]
    pub fn can_step_down(&self) -> bool {
        self.can_step_down
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the bounds, push them to the validator and reconcile.
    ///
    /// Invalid bounds are rejected and the previous ones stay in effect.
    pub fn set_limits(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), ConfigError> {
        let limits = Limits::new(min, max).inspect_err(|err| {
            log::warn!(target: "stepper.controller", "rejected limits: {err}");
        })?;
        self.limits = limits;
        self.validator.update_values(self.limits, self.step);
        self.reconcile();
        Ok(())
    }

    /// Replace the step size, push it to the validator and reconcile.
    ///
    /// A non-positive or non-finite step is rejected and the previous one
    /// stays in effect.
    pub fn set_step(&mut self, step: f64) -> Result<(), ConfigError> {
        let step = Step::new(step).inspect_err(|err| {
            log::warn!(target: "stepper.controller", "rejected step: {err}");
        })?;
        self.step = step;
        self.validator.update_values(self.limits, self.step);
        self.reconcile();
        Ok(())
    }

    /// Store `value` in canonical text form and reconcile.
    ///
    /// Non-finite values are ignored.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            log::warn!(target: "stepper.controller", "ignored non-finite value {value}");
            return;
        }
        self.text = self.value_text(value, None);
        self.reconcile();
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Add `step * acceleration` to the value and reconcile.
    pub fn step_up(&mut self) -> Option<ErrorKind> {
        self.apply_step(Direction::Up)
    }

    /// Subtract `step * acceleration` from the value and reconcile.
    pub fn step_down(&mut self) -> Option<ErrorKind> {
        self.apply_step(Direction::Down)
    }

    /// Grow the step multiplier by one, up to [`MAX_ACCELERATION`].
    pub fn accelerate(&mut self) {
        self.acceleration = (self.acceleration + 1).min(MAX_ACCELERATION);
    }

    /// Cancel any continuous step action, reset acceleration and leave the
    /// editing phase.
    pub fn abort(&mut self) {
        if self.phase != Phase::Idle {
            log::debug!(target: "stepper.controller", "abort from {:?}", self.phase);
        }
        self.phase = Phase::Idle;
        self.acceleration = 1;
    }

    /// Start a continuous step action and take the first step.
    pub fn begin_step(&mut self, direction: Direction) -> Option<ErrorKind> {
        self.acceleration = 1;
        self.phase = Phase::Ticking(direction);
        self.apply_step(direction)
    }

    /// One repeat tick of a held step action: step, then accelerate.
    ///
    /// Ticks for an action that is no longer running (released or aborted)
    /// are ignored.
    pub fn tick_step(&mut self, direction: Direction) -> Option<ErrorKind> {
        if self.phase != Phase::Ticking(direction) {
            log::trace!(target: "stepper.controller", "stale {direction:?} tick ignored");
            return None;
        }
        let error = self.apply_step(direction);
        if self.phase == Phase::Ticking(direction) {
            self.accelerate();
        }
        error
    }

    /// Finish a continuous step action.
    pub fn end_step(&mut self, direction: Direction) {
        if self.phase == Phase::Ticking(direction) {
            self.phase = Phase::Idle;
            self.acceleration = 1;
        }
    }

    pub fn on_step_up_begin(&mut self) -> Option<ErrorKind> {
        self.begin_step(Direction::Up)
    }

    pub fn on_step_up_tick(&mut self) -> Option<ErrorKind> {
        self.tick_step(Direction::Up)
    }

    pub fn on_step_up_end(&mut self) {
        self.end_step(Direction::Up)
    }

    pub fn on_step_down_begin(&mut self) -> Option<ErrorKind> {
        self.begin_step(Direction::Down)
    }

    pub fn on_step_down_tick(&mut self) -> Option<ErrorKind> {
        self.tick_step(Direction::Down)
    }

    pub fn on_step_down_end(&mut self) {
        self.end_step(Direction::Down)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// The field gained focus.
    pub fn on_edit_begin(&mut self) {
        if matches!(self.phase, Phase::Ticking(_)) {
            self.abort();
        }
        self.phase = Phase::Editing;
    }

    /// The field lost focus: commit the text through a reconciliation pass.
    pub fn on_edit_end(&mut self) -> Option<ErrorKind> {
        if self.phase == Phase::Editing {
            self.phase = Phase::Idle;
        }
        self.reconcile()
    }

    /// Replace `range` of the field text with `replacement`, if the
    /// validator allows it.
    ///
    /// The stepper applies accepted and rewritten edits to its own text; the
    /// host mirrors [`Stepper::text`] afterwards. Only the maximum and the
    /// character set are enforced here; minimum and step wait for
    /// [`Stepper::on_edit_end`].
    pub fn on_keystroke(&mut self, range: EditRange, replacement: &str) -> KeystrokeOutcome {
        if self.phase != Phase::Editing {
            self.on_edit_begin();
        }

        match self
            .validator
            .should_replace_text(&self.text, range, replacement)
        {
            EditDecision::Allow => {
                self.text = range.apply(&self.text, replacement);
                self.refresh_step_state();
                KeystrokeOutcome::Accepted
            }
            EditDecision::Reject(kind) => {
                self.notify_error(kind);
                KeystrokeOutcome::Rejected(kind)
            }
            EditDecision::Rewrite(text) => {
                self.text.clone_from(&text);
                self.refresh_step_state();
                KeystrokeOutcome::Rewritten(text)
            }
        }
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Check the current text and apply at most one correction:
    ///
    /// - above the maximum: report, clamp to the maximum, abort
    /// - below the minimum: report, clamp to the minimum, abort
    /// - off the step grid: report, truncate down onto the grid
    /// - not a number: report only
    ///
    /// Then refresh the enabled state of both step actions. Returns the
    /// detected error, if any.
    pub fn reconcile(&mut self) -> Option<ErrorKind> {
        let detected = self.validator.check_text(&self.text).err();

        if let Some(kind) = detected {
            self.notify_error(kind);
            match kind {
                ErrorKind::CrossedMax => {
                    if let Some(max) = self.limits.max() {
                        self.correct_to(format_exact(max));
                    }
                    self.abort();
                }
                ErrorKind::CrossedMin => {
                    if let Some(min) = self.limits.min() {
                        self.correct_to(format_exact(min));
                    }
                    self.abort();
                }
                ErrorKind::NonMultiple => {
                    if let Some(value) = self.value() {
                        let remainder =
                            (value - self.limits.anchor()).rem_euclid(self.step.get());
                        let truncated = value - remainder;
                        // Float error must not push the result under the grid origin.
                        let truncated = self
                            .limits
                            .min()
                            .map_or(truncated, |min| truncated.max(min));
                        let text = self.value_text(truncated, None);
                        self.correct_to(text);
                    }
                }
                ErrorKind::IncorrectSymbols => {}
            }
        }

        self.refresh_step_state();
        self.publish();
        detected
    }

    // --- internals ---

    fn apply_step(&mut self, direction: Direction) -> Option<ErrorKind> {
        let current = self.value().unwrap_or_else(|| self.limits.anchor());
        let delta = self.step.get() * f64::from(self.acceleration) * direction.sign();
        let next = current + delta;
        if !next.is_finite() {
            log::warn!(target: "stepper.controller", "step from {current} overflows");
            return None;
        }

        log::debug!(
            target: "stepper.controller",
            "step {direction:?} x{}: {current} -> {next}",
            self.acceleration
        );
        self.text = self.value_text(next, Some(current));
        self.reconcile()
    }

    /// Text for a value about to be stored.
    ///
    /// The rounded canonical form is used when it stands for the same grid
    /// position as `value` and sits on the same side of both bounds. For a
    /// step it must also stay nearer to `value` than to the value stepped
    /// `from`. Otherwise the exact form is stored, so rounding never undoes a
    /// correction or a step.
    fn value_text(&self, value: f64, from: Option<f64>) -> String {
        let text = format_value(value);
        let Some(rounded) = parse_number(&text) else {
            return format_exact(value);
        };

        let anchor = self.limits.anchor();
        let slack = grid_tolerance(value, anchor).min(self.step.get() / 2.0);
        let close = (rounded - value).abs() < slack;
        let keeps_grid =
            is_on_grid(rounded, anchor, self.step) || !is_on_grid(value, anchor, self.step);
        let keeps_min = self
            .limits
            .min()
            .is_none_or(|min| value < min || rounded >= min);
        let keeps_max = self
            .limits
            .max()
            .is_none_or(|max| value > max || rounded <= max);
        let moved =
            from.is_none_or(|from| (rounded - value).abs() < (value - from).abs() / 2.0);

        if close && keeps_grid && keeps_min && keeps_max && moved {
            text
        } else {
            format_exact(value)
        }
    }

    fn correct_to(&mut self, text: String) {
        log::debug!(target: "stepper.controller", "corrected {:?} to {text:?}", self.text);
        self.text = text;
    }

    fn refresh_step_state(&mut self) {
        let value = self.value().unwrap_or_else(|| self.limits.anchor());
        self.can_step_up = self.validator.can_step_up(value);
        self.can_step_down = self.validator.can_step_down(value);
    }

    fn notify_error(&mut self, kind: ErrorKind) {
        log::debug!(target: "stepper.controller", "{kind} ({:?})", self.text);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_error(kind);
        }
    }

    fn publish(&mut self) {
        let value = self.value();
        if value == self.committed {
            return;
        }
        self.committed = value;
        if let (Some(value), Some(observer)) = (value, self.observer.as_mut()) {
            observer.on_value_changed(value);
        }
    }
}

impl<V> fmt::Debug for Stepper<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stepper")
            .field("text", &self.text)
            .field("limits", &self.limits)
            .field("step", &self.step)
            .field("acceleration", &self.acceleration)
            .field("phase", &self.phase)
            .field("can_step_up", &self.can_step_up)
            .field("can_step_down", &self.can_step_down)
            .finish_non_exhaustive()
    }
}
