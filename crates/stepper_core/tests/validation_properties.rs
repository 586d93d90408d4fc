use proptest::prelude::*;
use proptest::strategy::Strategy;
use stepper_core::{
    EditDecision, EditRange, ErrorKind, Limits, MAX_ACCELERATION, NumericValidator, Step,
    StepValidator, Stepper, is_on_grid, parse_number,
};
use std::cell::RefCell;
use std::rc::Rc;

/// `(min, step, k)`: a lower bound, a step size and a grid index.
fn grid_strategy() -> impl Strategy<Value = (f64, f64, u32)> {
    (-1000.0f64..1000.0, 0.01f64..100.0, 0u32..1000)
}

fn validator(min: f64, max: f64, step: f64) -> NumericValidator {
    NumericValidator::new(
        Limits::new(Some(min), Some(max)).unwrap(),
        Step::new(step).unwrap(),
    )
}

fn recording_stepper(min: f64, max: f64, step: f64) -> (Stepper, Rc<RefCell<Vec<ErrorKind>>>) {
    let mut stepper = Stepper::new(
        Limits::new(Some(min), Some(max)).unwrap(),
        Step::new(step).unwrap(),
    );
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    stepper.set_observer(move |kind: ErrorKind| sink.borrow_mut().push(kind));
    (stepper, errors)
}

proptest! {
    /// Property: every on-step value inside the bounds is valid
    #[test]
    fn on_step_values_in_range_are_valid((min, step, k) in grid_strategy()) {
        let v = min + f64::from(k) * step;
        let max = min + 1000.0 * step;
        prop_assert_eq!(validator(min, max, step).check_value(v), Ok(()));
    }

    /// Property: anything above the maximum crosses it, whatever the step says
    #[test]
    fn above_max_reports_crossed_max(
        (min, step, _k) in grid_strategy(),
        span in 0.0f64..1000.0,
        over in 0.001f64..1e6,
    ) {
        let max = min + span;
        prop_assert_eq!(
            validator(min, max, step).check_value(max + over),
            Err(ErrorKind::CrossedMax)
        );
    }

    /// Property: anything below the minimum crosses it, whatever the step says
    #[test]
    fn below_min_reports_crossed_min(
        (min, step, _k) in grid_strategy(),
        under in 0.001f64..1e6,
    ) {
        let max = min + 1000.0 * step;
        prop_assert_eq!(
            validator(min, max, step).check_value(min - under),
            Err(ErrorKind::CrossedMin)
        );
    }

    /// Property: in range but between two grid points is a step violation
    #[test]
    fn off_step_values_in_range_are_non_multiple(
        (min, step, k) in grid_strategy(),
        frac in 0.01f64..0.99,
    ) {
        let v = min + (f64::from(k) + frac) * step;
        let max = min + 1001.0 * step;
        prop_assert_eq!(
            validator(min, max, step).check_value(v),
            Err(ErrorKind::NonMultiple)
        );
    }

    /// Property: a live edit is only allowed if the result is empty, a lone
    /// minus sign, or a number not above the maximum
    #[test]
    fn allowed_edits_are_partial_numbers_under_max(
        current in "[0-9.-]{0,4}",
        replacement in "[0-9a-z.-]{0,3}",
        max in -100.0f64..100.0,
    ) {
        let v = NumericValidator::new(Limits::new(None, Some(max)).unwrap(), Step::default());
        let range = EditRange::at(current.len());
        let edited = range.apply(&current, &replacement);

        if v.should_replace_text(&current, range, &replacement) == EditDecision::Allow {
            prop_assert!(
                edited.is_empty()
                    || edited == "-"
                    || parse_number(&edited).is_some_and(|n| n <= max),
                "allowed {:?}",
                edited
            );
        }
    }

    /// Property: reconciling an already valid state changes nothing and
    /// reports nothing
    #[test]
    fn reconciling_valid_state_is_silent((min, step, k) in grid_strategy()) {
        let (mut stepper, errors) = recording_stepper(min, min + 1000.0 * step, step);
        stepper.set_value(min + f64::from(k) * step);
        let before = stepper.text().to_string();
        errors.borrow_mut().clear();

        prop_assert_eq!(stepper.reconcile(), None);
        prop_assert_eq!(stepper.text(), before.as_str());
        prop_assert!(errors.borrow().is_empty());
    }

    /// Property: a value above the maximum is clamped to exactly the maximum
    #[test]
    fn clamping_yields_exact_max(
        (min, step, _k) in grid_strategy(),
        span in 0.0f64..1000.0,
        over in 0.001f64..1e6,
    ) {
        let max = min + span;
        let (mut stepper, errors) = recording_stepper(min, max, step);
        stepper.set_value(max + over);

        prop_assert_eq!(stepper.value(), Some(max));
        prop_assert_eq!(errors.borrow().first().copied(), Some(ErrorKind::CrossedMax));
    }

    /// Property: any value converges within two passes, after which the state
    /// is in range and on the grid
    #[test]
    fn reconciliation_converges(
        (min, step, _k) in grid_strategy(),
        span in 0.0f64..1000.0,
        v in -1e5f64..1e5,
    ) {
        let max = min + span;
        let (mut stepper, _errors) = recording_stepper(min, max, step);
        stepper.set_value(v);
        stepper.reconcile();

        prop_assert_eq!(stepper.reconcile(), None);
        let value = stepper.value().unwrap();
        prop_assert!(value >= min && value <= max, "{} outside {}..={}", value, min, max);
    }

    /// Property: far from zero, where float spacing approaches the step,
    /// truncation still lands on the grid in a single pass
    #[test]
    fn reconciliation_converges_at_large_magnitudes(
        anchor in -1e15f64..1e15,
        step in 0.01f64..1000.0,
        offset in 0.0f64..1e15,
    ) {
        let mut stepper = Stepper::new(
            Limits::new(Some(anchor), None).unwrap(),
            Step::new(step).unwrap(),
        );
        stepper.set_value(anchor + offset);
        stepper.reconcile();

        prop_assert_eq!(stepper.reconcile(), None);
        let value = stepper.value().unwrap();
        prop_assert!(value >= anchor, "{} below {}", value, anchor);
        prop_assert!(is_on_grid(value, anchor, Step::new(step).unwrap()));
    }

    /// Property: a single step always changes the value, however large it is
    #[test]
    fn steps_are_never_lost_to_rounding(
        start in -1e15f64..1e15,
        step in prop::sample::select(vec![0.25, 0.5, 1.0, 2.5]),
    ) {
        let mut stepper = Stepper::new(Limits::unbounded(), Step::new(step).unwrap());
        let start = (start / step).trunc() * step;
        stepper.set_value(start);
        let before = stepper.value().unwrap();

        stepper.step_up();
        prop_assert_eq!(stepper.value(), Some(before + step));
    }

    /// Property: acceleration grows by one per call and never passes the cap
    #[test]
    fn acceleration_is_capped(calls in 0u32..50) {
        let mut stepper = Stepper::new(Limits::unbounded(), Step::default());
        for _ in 0..calls {
            stepper.accelerate();
        }
        prop_assert_eq!(stepper.acceleration(), (calls + 1).min(MAX_ACCELERATION));

        stepper.abort();
        prop_assert_eq!(stepper.acceleration(), 1);
    }
}
