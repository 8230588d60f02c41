//! Control loop — the hexagonal core.
//!
//! [`ControlLoop`] owns every button, the power dial and the last power
//! value sent. Each [`tick`](ControlLoop::tick) samples them and turns
//! what changed into packets for the robot. The link, display and event
//! sink are injected at call sites, so the loop runs unchanged against
//! mock adapters.
//!
//! ```text
//!  buttons ──▶ ┌───────────────────────────┐ ──▶ Link (2-byte packets)
//!  dial    ──▶ │        ControlLoop        │ ──▶ DisplayPort (power)
//!              │ E-stop · pad · grip · pwr │ ──▶ EventSink
//!              └───────────────────────────┘
//! ```
//!
//! ## Evaluation order (per tick)
//!
//! 1. Emergency stop: send `EmergencyStop` and halt for good.
//! 2. Direction pad: update all four, send the first pushed (Up, Down,
//!    Left, Right).
//! 3. Stop: if none is held and at least one was just released.
//! 4. Grip buttons: update both, send the first released (Grab, Place).
//! 5. Power: send `SetPower` and redraw the readout when the dial moved
//!    past the deadband.
//!
//! Steps 2 and 3 are evaluated independently of each other. A push leaves
//! that direction held, so the same tick can never also infer `Stop`.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::{CONTROL_LOOP_PERIOD_MS, READOUT_CLEAR_RECT, READOUT_ORIGIN};
use crate::protocol::{Command, Link, Packet};

use super::events::{AppEvent, ExitReason};
use super::input::EdgeTriggeredInput;
use super::ports::{Colour, CounterPort, DisplayPort, EventSink, InputSource};
use super::power::PowerTracker;

// ───────────────────────────────────────────────────────────────
// Wiring
// ───────────────────────────────────────────────────────────────

/// One sampling source per physical input, handed to [`ControlLoop::new`].
pub struct ControllerInputs<S> {
    pub emergency_stop: S,
    pub up: S,
    pub down: S,
    pub left: S,
    pub right: S,
    pub grab: S,
    pub place: S,
}

/// A button and the command it sends.
pub struct ButtonBinding<S> {
    pub input: EdgeTriggeredInput<S>,
    pub command: Command,
}

impl<S: InputSource> ButtonBinding<S> {
    pub fn new(source: S, command: Command) -> Self {
        Self {
            input: EdgeTriggeredInput::new(source),
            command,
        }
    }
}

/// Outcome of a single [`ControlLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep polling.
    Continue,
    /// Emergency stop sent; the loop must not run again.
    Halted,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop<S, C> {
    emergency_stop: S,
    /// Scanned in array order; the first push wins.
    directional: [ButtonBinding<S>; 4],
    /// Scanned in array order; the first release wins.
    auxiliary: [ButtonBinding<S>; 2],
    dial: C,
    power: PowerTracker,
    halted: bool,
    iterations: u64,
    packets_sent: u64,
}

impl<S: InputSource, C: CounterPort> ControlLoop<S, C> {
    pub fn new(inputs: ControllerInputs<S>, dial: C) -> Self {
        let ControllerInputs {
            emergency_stop,
            up,
            down,
            left,
            right,
            grab,
            place,
        } = inputs;

        Self {
            emergency_stop,
            directional: [
                ButtonBinding::new(up, Command::Up),
                ButtonBinding::new(down, Command::Down),
                ButtonBinding::new(left, Command::Left),
                ButtonBinding::new(right, Command::Right),
            ],
            auxiliary: [
                ButtonBinding::new(grab, Command::GrabRubbish),
                ButtonBinding::new(place, Command::PlaceRubbish),
            ],
            dial,
            power: PowerTracker::new(),
            halted: false,
            iterations: 0,
            packets_sent: 0,
        }
    }

    // ── Main loop ─────────────────────────────────────────────

    /// Poll until the emergency stop is pressed or the link drops.
    ///
    /// The link is checked before every tick, so a loop started on a dead
    /// link sends nothing.
    pub fn run(
        &mut self,
        link: &mut impl Link,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        delay: &mut impl DelayNs,
    ) -> ExitReason {
        let reason = loop {
            if self.halted {
                break ExitReason::EmergencyStop;
            }
            if !link.is_connected() {
                warn!("Link lost");
                sink.emit(&AppEvent::LinkLost);
                break ExitReason::Disconnected;
            }
            if self.tick(link, display, sink) == Tick::Halted {
                break ExitReason::EmergencyStop;
            }
            delay.delay_ms(CONTROL_LOOP_PERIOD_MS);
        };

        info!(
            "Control loop exited ({:?}) after {} ticks, {} packets",
            reason, self.iterations, self.packets_sent
        );
        sink.emit(&AppEvent::Halted(reason));
        reason
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one iteration: sample every input and send what changed.
    ///
    /// Does not check the link; [`run`](Self::run) does that between ticks.
    pub fn tick(
        &mut self,
        link: &mut impl Link,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Tick {
        if self.halted {
            return Tick::Halted;
        }
        self.iterations += 1;

        // 1. Emergency stop beats everything, every tick.
        if self.emergency_stop.is_active() {
            warn!("Emergency stop pressed");
            self.send(link, sink, Packet::bare(Command::EmergencyStop));
            sink.emit(&AppEvent::EmergencyStop);
            self.halted = true;
            return Tick::Halted;
        }

        // 2. Direction pad: sample all four at the same instant first.
        let mut any_held = false;
        let mut any_released = false;
        for binding in &mut self.directional {
            binding.input.update();
            any_held |= binding.input.pressed();
            any_released |= binding.input.check_release();
        }
        let pushed = self
            .directional
            .iter()
            .find(|b| b.input.check_push())
            .map(|b| b.command);
        if let Some(command) = pushed {
            self.send(link, sink, Packet::bare(command));
        }

        // 3. Stop once the last held direction is let go.
        if !any_held && any_released {
            self.send(link, sink, Packet::bare(Command::Stop));
        }

        // 4. Grip buttons act on release.
        for binding in &mut self.auxiliary {
            binding.input.update();
        }
        let released = self
            .auxiliary
            .iter()
            .find(|b| b.input.check_release())
            .map(|b| b.command);
        if let Some(command) = released {
            self.send(link, sink, Packet::bare(command));
        }

        // 5. Power dial.
        let counts = self.dial.counts();
        if let Some(percent) = self.power.update(counts) {
            self.send(link, sink, Packet::set_power(percent));
            refresh_readout(display, percent);
            sink.emit(&AppEvent::PowerChanged(percent));
        }

        Tick::Continue
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last power percentage sent (100 until the dial moves).
    pub fn last_power(&self) -> u8 {
        self.power.last_sent()
    }

    /// True once the emergency stop has been sent.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Ticks executed, including the one that halted.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Packets handed to the link, including ones whose write failed.
    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    // ── Internal ──────────────────────────────────────────────

    /// Fire-and-forget: a failed write is logged, never retried.
    fn send(&mut self, link: &mut impl Link, sink: &mut impl EventSink, packet: Packet) {
        info!("TX | {}", packet);
        if let Err(e) = link.write(&packet.encode()) {
            warn!("TX | {} not written: {:?}", packet, e);
        }
        self.packets_sent += 1;
        sink.emit(&AppEvent::PacketSent(packet));
    }
}

/// Clear the readout area and print `percent` in decimal.
fn refresh_readout(display: &mut impl DisplayPort, percent: u8) {
    let mut text = heapless::String::<4>::new();
    // "200" is the longest value; cannot overflow.
    let _ = write!(text, "{percent}");

    let (x0, y0, x1, y1) = READOUT_CLEAR_RECT;
    display.fill_rect(x0, y0, x1, y1, Colour::White);
    let (x, y) = READOUT_ORIGIN;
    display.draw_text(&text, x, y);
}
