//! Polled button edge detector.
//!
//! ## Hardware
//!
//! Momentary switch between 3V3 and the button GPIO, so the line reads HIGH
//! while pressed.  There is no interrupt; the main loop samples the line once
//! per poll interval and feeds the sample to [`EdgeTracker::update`].
//!
//! ## Edge classification
//!
//! | Previous | Current | Result             |
//! |----------|---------|--------------------|
//! | LOW      | HIGH    | `Some(Rising)`     |
//! | HIGH     | LOW     | `Some(Falling)`    |
//! | LOW      | LOW     | `None`             |
//! | HIGH     | HIGH    | `None`             |
//!
//! The poll interval (500 ms by default) doubles as the debounce window:
//! contact bounce settles long before the next sample, and a button held
//! down across many polls yields exactly one rising edge.

use crate::app::ports::PinState;

/// Edge observed between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

/// Retains the previous sample across poll iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTracker {
    previous: PinState,
}

impl Default for EdgeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeTracker {
    /// Start as if the button had been released, so a button already held
    /// at start-up counts as one press.
    pub fn new() -> Self {
        Self {
            previous: PinState::Low,
        }
    }

    /// Record `current` and classify the transition from the previous sample.
    pub fn update(&mut self, current: PinState) -> Option<Edge> {
        let edge = match (self.previous, current) {
            (PinState::Low, PinState::High) => Some(Edge::Rising),
            (PinState::High, PinState::Low) => Some(Edge::Falling),
            _ => None,
        };
        self.previous = current;
        edge
    }
}
