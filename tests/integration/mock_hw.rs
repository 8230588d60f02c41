//! Mock hardware adapters for integration tests.
//!
//! Buttons and the dial share their level through `Rc<Cell<_>>`, so a test
//! keeps a handle and flips it between ticks. The link records every byte
//! written and decodes it the way the robot would.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use rubbish_remote::app::control_loop::{ControlLoop, ControllerInputs};
use rubbish_remote::app::events::AppEvent;
use rubbish_remote::app::ports::{Colour, CounterPort, DisplayPort, EventSink, FeedbackPort, InputSource};
use rubbish_remote::config::BdAddr;
use rubbish_remote::error::LinkError;
use rubbish_remote::protocol::codec::PacketDecoder;
use rubbish_remote::protocol::{Link, Packet};

// ── Inputs ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockButton(Rc<Cell<bool>>);

#[allow(dead_code)]
impl MockButton {
    pub fn press(&self) {
        self.0.set(true);
    }

    pub fn release(&self) {
        self.0.set(false);
    }
}

impl InputSource for MockButton {
    fn is_active(&mut self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct MockDial(Rc<Cell<i32>>);

#[allow(dead_code)]
impl MockDial {
    pub fn set(&self, counts: i32) {
        self.0.set(counts);
    }
}

impl CounterPort for MockDial {
    fn counts(&mut self) -> i32 {
        self.0.get()
    }
}

/// Test-side handles to every input of a [`ControlLoop`].
#[derive(Clone, Default)]
pub struct Pad {
    pub estop: MockButton,
    pub up: MockButton,
    pub down: MockButton,
    pub left: MockButton,
    pub right: MockButton,
    pub grab: MockButton,
    pub place: MockButton,
    pub dial: MockDial,
}

impl Pad {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loop wired to clones of this pad's handles.
    pub fn control_loop(&self) -> ControlLoop<MockButton, MockDial> {
        ControlLoop::new(
            ControllerInputs {
                emergency_stop: self.estop.clone(),
                up: self.up.clone(),
                down: self.down.clone(),
                left: self.left.clone(),
                right: self.right.clone(),
                grab: self.grab.clone(),
                place: self.place.clone(),
            },
            self.dial.clone(),
        )
    }
}

// ── Link ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingLink {
    pub wire: Vec<u8>,
    pub connects: Vec<(BdAddr, String)>,
    /// `is_connected` returns false for this many calls after `connect`.
    pub polls_until_up: u32,
    /// `is_connected` returns false once it has been called this many times.
    pub drop_after_checks: Option<u32>,
    pub reject_connect: bool,
    pub fail_writes: bool,
    checks: u32,
    connected: bool,
}

#[allow(dead_code)]
impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A link that is already up.
    pub fn up() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Everything written so far, decoded as the receiver sees it.
    pub fn packets(&self) -> Vec<Packet> {
        let mut decoder = PacketDecoder::new();
        let mut out = Vec::new();
        decoder.feed(&self.wire, |p| out.push(p));
        assert!(!decoder.is_mid_packet(), "wire ends mid-packet: {:?}", self.wire);
        assert_eq!(decoder.dropped(), 0, "wire holds unknown command bytes");
        out
    }

    /// Forget what has been written so far.
    pub fn clear(&mut self) {
        self.wire.clear();
    }

    pub fn is_up(&self) -> bool {
        self.connected
    }
}

impl Link for RecordingLink {
    type Error = LinkError;

    fn connect(&mut self, peer: &BdAddr, pin: &str) -> Result<(), LinkError> {
        self.connects.push((*peer, pin.to_owned()));
        if self.reject_connect {
            return Err(LinkError::Rejected);
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        if self.fail_writes {
            return Err(LinkError::Io);
        }
        self.wire.extend_from_slice(data);
        Ok(data.len())
    }

    fn is_connected(&mut self) -> bool {
        self.checks += 1;
        if let Some(limit) = self.drop_after_checks {
            if self.checks > limit {
                self.connected = false;
                return false;
            }
        }
        if !self.connected {
            if self.polls_until_up == 0 {
                self.connected = true;
            } else {
                self.polls_until_up -= 1;
            }
        }
        self.connected
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Fill { x0: i32, y0: i32, x1: i32, y1: i32, colour: Colour },
    Text { text: String, x: i32, y: i32 },
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DrawCall>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.clone()),
                DrawCall::Fill { .. } => None,
            })
            .collect()
    }
}

impl DisplayPort for RecordingDisplay {
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Colour) {
        self.calls.push(DrawCall::Fill { x0, y0, x1, y1, colour });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
        });
    }
}

// ── Feedback / events / time ──────────────────────────────────

#[derive(Default)]
pub struct MockBuzzer {
    pub tones: Vec<(u32, u32)>,
}

impl FeedbackPort for MockBuzzer {
    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        self.tones.push((freq_hz, duration_ms));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, wanted: &AppEvent) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

/// Delay that returns at once, runs the next scripted step on every
/// `delay_ms`, and keeps the total time "slept".
#[derive(Default)]
pub struct ScriptedDelay {
    pub slept_ms: u64,
    pub sleeps: u32,
    script: VecDeque<Box<dyn FnMut()>>,
}

#[allow(dead_code)]
impl ScriptedDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `step` during the next delay not yet claimed by another step.
    pub fn then(mut self, step: impl FnMut() + 'static) -> Self {
        self.script.push_back(Box::new(step));
        self
    }
}

impl DelayNs for ScriptedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.slept_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
        self.sleeps += 1;
        if let Some(mut step) = self.script.pop_front() {
            step();
        }
    }
}
