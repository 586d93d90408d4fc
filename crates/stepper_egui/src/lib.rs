//! # stepper_egui
//!
//! egui front end for [`stepper_core::Stepper`].
//!
//! [`StepperField`] paints a numeric text box with decrement and increment
//! buttons and translates egui input into stepper calls:
//!
//! - focus gained starts editing; focus lost or Enter commits
//! - typed and pasted text become keystrokes over the current selection, so
//!   the stepper's validator accepts, rejects or rewrites each one
//! - ArrowUp/ArrowDown take a single step while the field has focus
//! - holding a button begins a continuous step action, repeated by a
//!   [`RepeatTimer`] and ended on release
//!
//! ```no_run
//! use stepper_core::{Limits, Step, Stepper};
//! use stepper_egui::StepperField;
//!
//! let mut stepper = Stepper::new(
//!     Limits::new(Some(0.0), Some(200.0)).unwrap(),
//!     Step::new(10.0).unwrap(),
//! );
//! let mut field = StepperField::new("volume");
//!
//! let ctx = egui::Context::default();
//! let _ = ctx.run(Default::default(), |ctx| {
//!     egui::CentralPanel::default().show(ctx, |ui| {
//!         let resp = field.show(ui, &mut stepper);
//!         if let Some(err) = resp.error {
//!             ui.label(err.to_string());
//!         }
//!     });
//! });
//! ```

mod field;
mod repeat;

pub use field::{StepperField, StepperResponse};
pub use repeat::{RepeatSignal, RepeatTimer};
