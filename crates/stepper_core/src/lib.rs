//! # stepper_core
//!
//! UI-agnostic validation and state layer for numeric stepper controls: a
//! text field paired with increment/decrement actions, constrained to a
//! range and a step multiple.
//!
//! This crate provides:
//! - [`StepValidator`]: the decisions a stepper delegates (can it step, is a
//!   text a legal value, may an edit proceed), with [`NumericValidator`] as
//!   the default strategy and [`IntegerValidator`] as an alternative
//! - [`Stepper`]: the controller that owns the field text, applies
//!   validator verdicts, and keeps text, value and button state consistent
//! - [`StepperConfig`]: TOML configuration
//!
//! ## Design Principles
//!
//! The crate does not draw anything and does not depend on any UI toolkit.
//! Hosts feed it three kinds of input: step actions (begin, repeat tick,
//! end), edit focus changes, and keystrokes expressed as "replace this byte
//! range of the current text with this string". Everything runs
//! synchronously on the caller's thread.
//!
//! ## Example
//!
//! ```
//! use stepper_core::{EditRange, ErrorKind, KeystrokeOutcome, Limits, Step, Stepper};
//!
//! let mut stepper = Stepper::new(
//!     Limits::new(Some(0.0), Some(200.0)).unwrap(),
//!     Step::new(10.0).unwrap(),
//! )
//! .with_value(5.0);
//! assert_eq!(stepper.text(), "0"); // truncated onto the step grid
//!
//! stepper.on_edit_begin();
//! assert_eq!(
//!     stepper.on_keystroke(EditRange::at(1), "a"),
//!     KeystrokeOutcome::Rejected(ErrorKind::IncorrectSymbols),
//! );
//! assert!(stepper.on_keystroke(EditRange::all("0"), "50").accepted());
//! assert_eq!(stepper.on_edit_end(), None);
//! assert_eq!(stepper.value(), Some(50.0));
//! ```

mod config;
mod edit;
mod error;
mod integer;
mod limits;
mod state;
mod stepper;
mod text;
mod validator;

pub use config::{DynStepper, RepeatConfig, StepperConfig};
pub use edit::EditRange;
pub use error::{ConfigError, EditDecision, ErrorKind, Validity};
pub use integer::IntegerValidator;
pub use limits::{Limits, Step};
pub use state::{Direction, Phase};
pub use stepper::{KeystrokeOutcome, MAX_ACCELERATION, Stepper, StepperObserver};
pub use validator::{NumericValidator, ON_STEP_EPSILON, StepValidator, is_on_grid};

// Re-export text utilities for integration layers that track a caret.
pub use text::{
    clamp_to_char_boundary, format_exact, format_value, has_numeric_shape, next_cursor_boundary,
    parse_number, prev_cursor_boundary,
};
