//! Console display adapter.
//!
//! Implements [`DisplayPort`] by logging draw calls. The last text drawn is
//! kept so the power readout can be inspected.

use log::{debug, info};

use crate::app::ports::{Colour, DisplayPort};

#[derive(Default)]
pub struct ConsoleDisplay {
    last_text: heapless::String<16>,
    draws: u32,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text drawn, empty before the first draw.
    pub fn last_text(&self) -> &str {
        self.last_text.as_str()
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }
}

impl DisplayPort for ConsoleDisplay {
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Colour) {
        debug!("LCD | fill ({},{})-({},{}) {:?}", x0, y0, x1, y1, colour);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        info!("LCD | \"{}\" at ({},{})", text, x, y);
        self.last_text.clear();
        // Readout text is at most "200"; anything longer is truncated.
        for c in text.chars() {
            if self.last_text.push(c).is_err() {
                break;
            }
        }
        self.draws = self.draws.saturating_add(1);
    }
}
