//! Port traits — the hexagonal boundary between command logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (buttons, dial, display, buzzer, event sinks) implement
//! these traits. The [`ControlLoop`](super::control_loop::ControlLoop)
//! consumes them via generics, so the domain core never touches hardware
//! directly. The radio link port lives with the wire protocol in
//! [`crate::protocol::transport::Link`].

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A single boolean sampling source: one button, one switch.
///
/// Sampling is infallible from the domain's point of view; adapters map
/// read faults to `false`.
pub trait InputSource {
    /// Sample the input. `true` = pressed / active.
    fn is_active(&mut self) -> bool;
}

impl<F> InputSource for F
where
    F: FnMut() -> bool,
{
    fn is_active(&mut self) -> bool {
        self()
    }
}

// ───────────────────────────────────────────────────────────────
// Counter port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Signed position counter (the hand-turned power dial).
pub trait CounterPort {
    /// Current count since power-up. Positive = clockwise.
    fn counts(&mut self) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    White,
}

/// Minimal drawing primitives for the on-device readout.
pub trait DisplayPort {
    /// Fill the rectangle with corners `(x0, y0)` and `(x1, y1)`.
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Colour);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
}

// ───────────────────────────────────────────────────────────────
// Feedback port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Audible feedback. Cosmetic; never part of a command decision.
pub trait FeedbackPort {
    /// Play a tone and return once it has finished.
    fn tone(&mut self, freq_hz: u32, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
