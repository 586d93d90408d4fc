//! Press-and-hold repeat for the step buttons.
//!
//! A [`RepeatTimer`] turns a "button is down" flag sampled once per frame into
//! the begin/tick/end signals a [`Stepper`](stepper_core::Stepper) expects.
//! It reads no clock of its own; the host passes the current time in seconds
//! (egui's `InputState::time`), which keeps it testable without a UI.

use std::time::Duration;
use stepper_core::RepeatConfig;

/// What a held button asks of the stepper in this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatSignal {
    /// Nothing to do.
    Idle,
    /// The button went down: take the first step.
    Begin,
    /// The button is still down and a repeat is due.
    Tick,
    /// The button was released.
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Hold {
    Released,
    Held { next_tick: f64 },
    /// Still down, but the stepper ended the action (e.g. a bound was
    /// crossed). No ticks until the button is released.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepeatTimer {
    delay: f64,
    interval: f64,
    hold: Hold,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(RepeatConfig::default())
    }
}

impl RepeatTimer {
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            delay: ms_to_secs(config.delay_ms),
            interval: ms_to_secs(config.interval_ms),
            hold: Hold::Released,
        }
    }

    /// The button is down, whether or not ticks are still being produced.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.hold != Hold::Released
    }

    /// The button is down and ticks are being produced.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.hold, Hold::Held { .. })
    }

    /// Stop producing ticks until the button is released.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.hold = Hold::Cancelled;
        }
    }

    /// Advance the timer to `now` given whether the button is down.
    ///
    /// At most one tick is produced per call. A host that stalls does not
    /// receive a burst of catch-up ticks.
    pub fn poll(&mut self, now: f64, held: bool) -> RepeatSignal {
        match (self.hold, held) {
            (Hold::Released, false) => RepeatSignal::Idle,
            (Hold::Released, true) => {
                self.hold = Hold::Held {
                    next_tick: now + self.delay,
                };
                RepeatSignal::Begin
            }
            (Hold::Held { next_tick }, true) if now >= next_tick => {
                let next = next_tick + self.interval;
                let next_tick = if next < now { now + self.interval } else { next };
                self.hold = Hold::Held { next_tick };
                RepeatSignal::Tick
            }
            (Hold::Held { .. } | Hold::Cancelled, true) => RepeatSignal::Idle,
            (Hold::Held { .. } | Hold::Cancelled, false) => {
                self.hold = Hold::Released;
                RepeatSignal::End
            }
        }
    }

    /// Time left until the next tick is due, if one is pending.
    pub fn time_until_next(&self, now: f64) -> Option<Duration> {
        match self.hold {
            Hold::Held { next_tick } => {
                Some(Duration::from_secs_f64((next_tick - now).max(0.0)))
            }
            _ => None,
        }
    }
}

fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> RepeatTimer {
        RepeatTimer::new(RepeatConfig {
            delay_ms: 400,
            interval_ms: 100,
        })
    }

    #[test]
    fn idle_until_pressed() {
        let mut t = timer();
        assert_eq!(t.poll(0.0, false), RepeatSignal::Idle);
        assert_eq!(t.poll(5.0, false), RepeatSignal::Idle);
        assert!(!t.is_pressed());
        assert_eq!(t.time_until_next(5.0), None);
    }

    #[test]
    fn press_waits_for_delay_then_repeats() {
        let mut t = timer();
        assert_eq!(t.poll(1.0, true), RepeatSignal::Begin);
        assert!(t.is_running());
        assert_eq!(t.poll(1.2, true), RepeatSignal::Idle);
        assert_eq!(t.poll(1.41, true), RepeatSignal::Tick);
        assert_eq!(t.poll(1.45, true), RepeatSignal::Idle);
        assert_eq!(t.poll(1.51, true), RepeatSignal::Tick);
        assert_eq!(t.poll(1.61, true), RepeatSignal::Tick);
    }

    #[test]
    fn release_ends_once() {
        let mut t = timer();
        t.poll(0.0, true);
        assert_eq!(t.poll(0.1, false), RepeatSignal::End);
        assert_eq!(t.poll(0.2, false), RepeatSignal::Idle);
        assert!(!t.is_pressed());
    }

    #[test]
    fn stalled_host_gets_one_tick_per_poll() {
        let mut t = timer();
        t.poll(0.0, true);
        assert_eq!(t.poll(10.0, true), RepeatSignal::Tick);
        assert_eq!(t.poll(10.05, true), RepeatSignal::Idle);
        assert_eq!(t.poll(10.15, true), RepeatSignal::Tick);
    }

    #[test]
    fn cancel_latches_until_release() {
        let mut t = timer();
        t.poll(0.0, true);
        t.cancel();
        assert!(t.is_pressed());
        assert!(!t.is_running());
        assert_eq!(t.poll(1.0, true), RepeatSignal::Idle);
        assert_eq!(t.poll(2.0, true), RepeatSignal::Idle);
        assert_eq!(t.poll(2.1, false), RepeatSignal::End);

        // A fresh press starts over.
        assert_eq!(t.poll(3.0, true), RepeatSignal::Begin);
    }

    #[test]
    fn cancel_without_press_is_noop() {
        let mut t = timer();
        t.cancel();
        assert_eq!(t.poll(0.0, true), RepeatSignal::Begin);
    }

    #[test]
    fn reports_wait_until_next_tick() {
        let mut t = timer();
        t.poll(2.0, true);
        let wait = t.time_until_next(2.1).unwrap().as_secs_f64();
        assert!((wait - 0.3).abs() < 1e-9);
        assert_eq!(t.time_until_next(9.0), Some(Duration::ZERO));
    }
}
