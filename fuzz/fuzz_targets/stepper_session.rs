#![no_main]

use libfuzzer_sys::fuzz_target;
use stepper_core::{EditRange, Limits, MAX_ACCELERATION, Step, Stepper};

const MIN: f64 = 0.0;
const MAX: f64 = 100.0;

fn assert_in_bounds(stepper: &Stepper) {
    let value = stepper.value().unwrap();
    assert!((MIN..=MAX).contains(&value), "{value} escaped after stepping");
}

fuzz_target!(|ops: &[u8]| {
    let mut stepper = Stepper::new(
        Limits::new(Some(MIN), Some(MAX)).unwrap(),
        Step::new(5.0).unwrap(),
    );

    for &op in ops {
        let len = stepper.text().len();
        match op % 13 {
            0 => {
                stepper.on_step_up_begin();
                assert_in_bounds(&stepper);
            }
            1 => {
                stepper.on_step_up_tick();
            }
            2 => stepper.on_step_up_end(),
            3 => {
                stepper.on_step_down_begin();
                assert_in_bounds(&stepper);
            }
            4 => {
                stepper.on_step_down_tick();
            }
            5 => stepper.on_step_down_end(),
            6 => stepper.on_edit_begin(),
            7 => {
                stepper.on_edit_end();
            }
            8 => {
                let digit = char::from(b'0' + op / 13 % 10).to_string();
                stepper.on_keystroke(EditRange::at(len), &digit);
            }
            9 => {
                stepper.on_keystroke(EditRange::new(len.saturating_sub(1), len), "");
            }
            10 => {
                stepper.on_keystroke(EditRange::at(0), "-");
            }
            11 => {
                stepper.on_keystroke(EditRange::at(len), ".");
            }
            _ => {
                stepper.on_keystroke(EditRange::all(stepper.text()), "");
            }
        }
        assert!((1..=MAX_ACCELERATION).contains(&stepper.acceleration()));
    }

    // Two passes always settle a parseable value inside the bounds.
    stepper.on_edit_end();
    stepper.reconcile();
    if let Some(value) = stepper.value() {
        assert!((MIN..=MAX).contains(&value), "{value} escaped after commit");
        assert_eq!(stepper.reconcile(), None);
    }
});
