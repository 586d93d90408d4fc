#![no_main]

use libfuzzer_sys::fuzz_target;
use stepper_core::{
    EditDecision, EditRange, Limits, NumericValidator, Step, StepValidator, has_numeric_shape,
    parse_number,
};

const MAX: f64 = 1000.0;

fuzz_target!(|data: &[u8]| {
    let [start, end, rest @ ..] = data else {
        return;
    };
    let input = String::from_utf8_lossy(rest);
    let (current, replacement) = input.split_once('\n').unwrap_or((&input, ""));

    let validator = NumericValidator::new(
        Limits::new(Some(-MAX), Some(MAX)).unwrap(),
        Step::default(),
    );
    let range = EditRange::new(usize::from(*start), usize::from(*end));
    let edited = range.apply(current, replacement);

    match validator.should_replace_text(current, range, replacement) {
        EditDecision::Allow => {
            assert!(has_numeric_shape(&edited), "allowed {edited:?}");
            assert!(
                edited.is_empty()
                    || edited == "-"
                    || parse_number(&edited).is_some_and(|v| v <= MAX),
                "allowed {edited:?} above the maximum"
            );
        }
        EditDecision::Reject(_) => {}
        EditDecision::Rewrite(text) => {
            panic!("numeric validator rewrote {edited:?} as {text:?}")
        }
    }
});
