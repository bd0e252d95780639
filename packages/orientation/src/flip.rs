//! Flip ("shake") gesture detector.
//!
//! Watches the raw z axis cross the arm level and come back past the fire
//! level: a deliberate flip-over-and-back motion. This is intentionally a
//! separate machine from the `is_topdown` hysteresis flag even though both
//! look at the same physical crossing; the flag is tuned for stable UI
//! output while this one is tuned for gesture latency, and the two use
//! different margins.

use statig::prelude::*;

#[derive(Clone, Copy, Debug)]
pub(crate) enum FlipEvent {
    /// Raw z-axis reading for this update cycle.
    Sample { z: i32 },
    /// Caller-managed reset, issued once the feedback window expires.
    Stop,
}

pub(crate) struct FlipHsm {
    arm_level: i32,
    fire_level: i32,
    latched: bool,
}

impl FlipHsm {
    pub(crate) fn new(arm_level: i32, fire_level: i32) -> Self {
        Self {
            arm_level,
            fire_level,
            latched: false,
        }
    }

    pub(crate) fn latched(&self) -> bool {
        self.latched
    }
}

#[state_machine(initial = "State::level()")]
impl FlipHsm {
    /// Device has not crossed the arm level since the last fire/reset.
    #[state]
    fn level(&mut self, event: &FlipEvent) -> Outcome<State> {
        match event {
            FlipEvent::Sample { z } if *z > self.arm_level => {
                Transition(State::flipped())
            }
            FlipEvent::Sample { .. } => Handled,
            FlipEvent::Stop => {
                self.latched = false;
                Handled
            }
        }
    }

    /// Device crossed the arm level; waiting for it to come back.
    #[state]
    fn flipped(&mut self, event: &FlipEvent) -> Outcome<State> {
        match event {
            FlipEvent::Sample { z } if *z < self.fire_level => {
                self.latched = true;
                Transition(State::level())
            }
            FlipEvent::Sample { .. } => Handled,
            FlipEvent::Stop => {
                self.latched = false;
                Handled
            }
        }
    }
}
