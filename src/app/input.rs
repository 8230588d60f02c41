//! Edge-triggered wrapper around a sampled input.
//!
//! Keeps the sample from the current and the previous loop iteration so
//! callers can ask for the rising edge (push), the falling edge (release)
//! or the level (held).
//!
//! | previous | current | push | release | pressed |
//! |----------|---------|------|---------|---------|
//! | false    | true    | yes  |         | yes     |
//! | true     | false   |      | yes     |         |
//! | true     | true    |      |         | yes     |
//! | false    | false   |      |         |         |

use super::ports::InputSource;

pub struct EdgeTriggeredInput<S> {
    source: S,
    current: bool,
    previous: bool,
}

impl<S: InputSource> EdgeTriggeredInput<S> {
    /// Both samples start released, so an input already held at power-up
    /// reports a push on the first `update`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: false,
            previous: false,
        }
    }

    /// Shift the current sample into `previous` and re-sample.
    /// Call exactly once per loop iteration.
    pub fn update(&mut self) {
        self.previous = self.current;
        self.current = self.source.is_active();
    }

    /// Rising edge since the last `update`.
    pub fn check_push(&self) -> bool {
        self.current && !self.previous
    }

    /// Falling edge since the last `update`.
    pub fn check_release(&self) -> bool {
        !self.current && self.previous
    }

    /// Level at the last `update`.
    pub fn pressed(&self) -> bool {
        self.current
    }
}
