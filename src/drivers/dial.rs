//! Quadrature decoder for the hand-turned power dial.
//!
//! ## Hardware
//!
//! Mechanical incremental encoder, channels A and B to GPIO with pull-ups.
//! Both pins interrupt on any edge; the ISR samples A and B and calls
//! [`dial_isr_handler`], which steps a lock-free counter. The control
//! loop reads the counter through [`DialEncoder`].
//!
//! ## Decoding
//!
//! Clockwise is the Gray sequence `00 → 01 → 11 → 10 → 00`, one count per
//! transition. A jump across two states (missed edge) is ambiguous and
//! counted as zero.

use core::sync::atomic::{AtomicI32, AtomicU8, Ordering};

/// Count delta indexed by `(previous_ab << 2) | current_ab`.
const QUADRATURE_STEP: [i8; 16] = [
    0, 1, -1, 0, //  from 00
    -1, 0, 0, 1, //  from 01
    1, 0, 0, -1, //  from 10
    0, -1, 1, 0, //  from 11
];

/// Encoder state shared between the ISR and the main loop.
pub struct DialState {
    count: AtomicI32,
    last_ab: AtomicU8,
}

impl DialState {
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
            last_ab: AtomicU8::new(0),
        }
    }

    /// Record the pin levels without counting (call once before enabling
    /// interrupts).
    pub fn seed(&self, a: bool, b: bool) {
        self.last_ab.store(encode_ab(a, b), Ordering::Release);
    }

    /// Step the counter from a new A/B sample. ISR-safe.
    pub fn on_edge(&self, a: bool, b: bool) {
        let ab = encode_ab(a, b);
        let prev = self.last_ab.swap(ab, Ordering::AcqRel);
        let step = QUADRATURE_STEP[((prev << 2) | ab) as usize];
        if step != 0 {
            self.count.fetch_add(i32::from(step), Ordering::AcqRel);
        }
    }

    pub fn count(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for DialState {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_ab(a: bool, b: bool) -> u8 {
    (u8::from(a) << 1) | u8::from(b)
}

/// The board's single dial. Written by the ISR, read by the main loop.
pub static DIAL: DialState = DialState::new();

/// ISR handler — register on both encoder pins, any edge.
/// Safe to call from interrupt context (lock-free atomics only).
pub fn dial_isr_handler(a: bool, b: bool) {
    DIAL.on_edge(a, b);
}

/// Read side of a [`DialState`].
pub struct DialEncoder {
    state: &'static DialState,
}

impl DialEncoder {
    pub fn new(state: &'static DialState) -> Self {
        Self { state }
    }

    /// Current signed count since power-up.
    pub fn read(&self) -> i32 {
        self.state.count()
    }
}
