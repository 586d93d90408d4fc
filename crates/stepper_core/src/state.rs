//! Interaction phase of a stepper.

/// Which way a step action moves the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `+1.0` for up, `-1.0` for down.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// What the user is currently doing with the stepper.
///
/// Transitions:
/// - `Idle -> Editing` when the field gains focus
/// - `Editing -> Idle` when the field loses focus (runs a reconciliation pass)
/// - `Idle | Editing -> Ticking` when a step button is pressed
/// - `Ticking -> Idle` when the button is released or the action is aborted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Editing,
    /// A continuous step action is in progress.
    Ticking(Direction),
}
