//! Integration tests for the ControlLoop → Packet → Link pipeline.
//!
//! Inputs are driven through shared mock handles, every byte the loop
//! writes is decoded with the receiver-side `PacketDecoder`, and the draw
//! calls and events are recorded for inspection.

use rubbish_remote::app::control_loop::Tick;
use rubbish_remote::app::events::{AppEvent, ExitReason};
use rubbish_remote::app::ports::Colour;
use rubbish_remote::protocol::{Command, Packet};

use super::mock_hw::{DrawCall, Pad, RecordingDisplay, RecordingLink, RecordingSink, ScriptedDelay};

const STOP: Packet = Packet::bare(Command::Stop);

struct Rig {
    link: RecordingLink,
    display: RecordingDisplay,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            link: RecordingLink::up(),
            display: RecordingDisplay::new(),
            sink: RecordingSink::new(),
        }
    }
}

/// Run one tick and return the packets it put on the wire.
fn tick(
    control: &mut rubbish_remote::app::control_loop::ControlLoop<
        super::mock_hw::MockButton,
        super::mock_hw::MockDial,
    >,
    rig: &mut Rig,
) -> Vec<Packet> {
    rig.link.clear();
    control.tick(&mut rig.link, &mut rig.display, &mut rig.sink);
    rig.link.packets()
}

// ── Directional pad ───────────────────────────────────────────

#[test]
fn single_push_sends_direction_without_stop() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    assert!(tick(&mut control, &mut rig).is_empty());

    pad.up.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Up)]);
    assert_eq!(rig.link.wire, [0, 0]);
}

#[test]
fn holding_a_direction_sends_once() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.left.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Left)]);
    for _ in 0..5 {
        assert!(tick(&mut control, &mut rig).is_empty());
    }
}

#[test]
fn releasing_all_directions_sends_one_stop() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.up.press();
    pad.down.press();
    pad.left.press();
    pad.right.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Up)]);

    pad.up.release();
    pad.down.release();
    pad.left.release();
    pad.right.release();
    assert_eq!(tick(&mut control, &mut rig), [STOP]);
    assert!(tick(&mut control, &mut rig).is_empty());
}

#[test]
fn releasing_one_of_two_held_sends_nothing() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.up.press();
    pad.right.press();
    tick(&mut control, &mut rig);

    pad.up.release();
    assert!(tick(&mut control, &mut rig).is_empty());

    pad.right.release();
    assert_eq!(tick(&mut control, &mut rig), [STOP]);
}

#[test]
fn lowest_index_wins_simultaneous_push() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.right.press();
    pad.down.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Down)]);
}

#[test]
fn release_while_pushing_another_sends_only_the_push() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.up.press();
    tick(&mut control, &mut rig);

    // Up lets go while Left goes down: Left is held, so no Stop.
    pad.up.release();
    pad.left.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Left)]);
}

#[test]
fn rolling_press_sends_each_direction_once() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.up.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Up)]);
    pad.right.press();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Right)]);
    pad.up.release();
    assert!(tick(&mut control, &mut rig).is_empty());
    pad.right.release();
    assert_eq!(tick(&mut control, &mut rig), [STOP]);
}

#[test]
fn button_held_at_power_up_reads_as_push() {
    let pad = Pad::new();
    pad.down.press();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::Down)]);
}

// ── Grip buttons ──────────────────────────────────────────────

#[test]
fn grab_fires_on_release_not_push() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.grab.press();
    assert!(tick(&mut control, &mut rig).is_empty());
    assert!(tick(&mut control, &mut rig).is_empty());

    pad.grab.release();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::GrabRubbish)]);
    assert_eq!(rig.link.wire, [5, 0]);
}

#[test]
fn grab_wins_when_both_grip_buttons_release_together() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.grab.press();
    pad.place.press();
    tick(&mut control, &mut rig);

    pad.grab.release();
    pad.place.release();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::GrabRubbish)]);
    // Place's release edge is gone once the next tick samples again.
    assert!(tick(&mut control, &mut rig).is_empty());
}

#[test]
fn place_release_alone_sends_place() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.place.press();
    tick(&mut control, &mut rig);
    pad.place.release();
    assert_eq!(tick(&mut control, &mut rig), [Packet::bare(Command::PlaceRubbish)]);
    assert_eq!(rig.link.wire, [6, 0]);
}

#[test]
fn one_tick_follows_fixed_command_order() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.right.press();
    pad.place.press();
    tick(&mut control, &mut rig);

    pad.right.release();
    pad.up.press();
    pad.place.release();
    pad.dial.set(-60);
    assert_eq!(
        tick(&mut control, &mut rig),
        [
            Packet::bare(Command::Up),
            Packet::bare(Command::PlaceRubbish),
            Packet::set_power(70),
        ]
    );
}

// ── Power dial ────────────────────────────────────────────────

#[test]
fn dial_at_rest_sends_no_power() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    assert!(tick(&mut control, &mut rig).is_empty());
    assert_eq!(control.last_power(), 100);
}

#[test]
fn large_dial_turn_sends_power_and_redraws_readout() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    tick(&mut control, &mut rig);
    pad.dial.set(400);
    assert_eq!(tick(&mut control, &mut rig), [Packet::set_power(200)]);
    assert_eq!(rig.link.wire, [8, 200]);
    assert_eq!(control.last_power(), 200);

    assert_eq!(
        rig.display.calls,
        [
            DrawCall::Fill {
                x0: 20,
                y0: 20,
                x1: 38,
                y1: 28,
                colour: Colour::White
            },
            DrawCall::Text {
                text: "200".to_owned(),
                x: 20,
                y: 20
            },
        ]
    );
    assert_eq!(rig.sink.count(&AppEvent::PowerChanged(200)), 1);

    // Further clockwise turns are clamped at 200.
    pad.dial.set(402);
    assert!(tick(&mut control, &mut rig).is_empty());
    assert_eq!(rig.display.calls.len(), 2);
}

#[test]
fn small_dial_drift_stays_inside_deadband() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    // 18 counts → 109%, delta 9: not sent.
    pad.dial.set(18);
    assert!(tick(&mut control, &mut rig).is_empty());

    // 20 counts → 110%, delta 10: sent.
    pad.dial.set(20);
    assert_eq!(tick(&mut control, &mut rig), [Packet::set_power(110)]);

    // Back to 100% is a delta of 10 from the last value sent.
    pad.dial.set(0);
    assert_eq!(tick(&mut control, &mut rig), [Packet::set_power(100)]);
    assert_eq!(rig.display.texts(), ["110", "100"]);
}

#[test]
fn slow_drift_is_measured_from_last_sent_value() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    // Creep down 2% per tick; a packet goes out every 10%.
    let mut sent = Vec::new();
    for step in 1..=10 {
        pad.dial.set(-4 * step);
        sent.extend(tick(&mut control, &mut rig));
    }
    assert_eq!(sent, [Packet::set_power(90), Packet::set_power(80)]);
}

#[test]
fn anticlockwise_limit_clamps_to_zero() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.dial.set(-10_000);
    assert_eq!(tick(&mut control, &mut rig), [Packet::set_power(0)]);
    assert_eq!(rig.display.texts(), ["0"]);
}

// ── Emergency stop ────────────────────────────────────────────

#[test]
fn emergency_stop_preempts_everything_and_halts() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    pad.estop.press();
    pad.up.press();
    pad.dial.set(400);
    rig.link.clear();
    assert_eq!(control.tick(&mut rig.link, &mut rig.display, &mut rig.sink), Tick::Halted);
    assert_eq!(rig.link.packets(), [Packet::bare(Command::EmergencyStop)]);
    assert_eq!(rig.link.wire, [7, 0]);
    assert!(rig.display.calls.is_empty());

    // Nothing is evaluated on later ticks, whatever the inputs do.
    pad.estop.release();
    pad.up.release();
    pad.grab.press();
    pad.dial.set(-400);
    for _ in 0..3 {
        assert!(tick(&mut control, &mut rig).is_empty());
    }
    assert!(control.is_halted());
    assert_eq!(control.iterations(), 1);
    assert_eq!(rig.sink.count(&AppEvent::EmergencyStop), 1);
}

// ── run() ─────────────────────────────────────────────────────

#[test]
fn run_exits_on_emergency_stop_even_with_link_up() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();

    let (up, estop) = (pad.up.clone(), pad.estop.clone());
    let mut delay = ScriptedDelay::new()
        .then(move || up.press())
        .then(|| {})
        .then(move || estop.press());

    let reason = control.run(&mut rig.link, &mut rig.display, &mut rig.sink, &mut delay);

    assert_eq!(reason, ExitReason::EmergencyStop);
    assert_eq!(
        rig.link.packets(),
        [Packet::bare(Command::Up), Packet::bare(Command::EmergencyStop)]
    );
    assert!(rig.link.is_up());
    assert_eq!(control.iterations(), 4);
    assert_eq!(delay.slept_ms, 30);
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::Halted(ExitReason::EmergencyStop))
    );
}

#[test]
fn run_exits_when_link_drops() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();
    rig.link.drop_after_checks = Some(3);

    let grab = pad.grab.clone();
    let grab2 = pad.grab.clone();
    let mut delay = ScriptedDelay::new()
        .then(move || grab.press())
        .then(move || grab2.release());

    let reason = control.run(&mut rig.link, &mut rig.display, &mut rig.sink, &mut delay);

    assert_eq!(reason, ExitReason::Disconnected);
    assert_eq!(control.iterations(), 3);
    assert_eq!(rig.link.packets(), [Packet::bare(Command::GrabRubbish)]);
    assert_eq!(rig.sink.count(&AppEvent::LinkLost), 1);
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::Halted(ExitReason::Disconnected))
    );
}

#[test]
fn run_on_dead_link_sends_nothing() {
    let pad = Pad::new();
    pad.up.press();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();
    rig.link.drop_after_checks = Some(0);

    let mut delay = ScriptedDelay::new();
    let reason = control.run(&mut rig.link, &mut rig.display, &mut rig.sink, &mut delay);

    assert_eq!(reason, ExitReason::Disconnected);
    assert!(rig.link.wire.is_empty());
    assert_eq!(control.iterations(), 0);
    assert_eq!(delay.sleeps, 0);
}

#[test]
fn emergency_stop_beats_link_loss_in_same_tick() {
    let pad = Pad::new();
    pad.estop.press();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();
    // Up for the first check only.
    rig.link.drop_after_checks = Some(1);

    let reason = control.run(&mut rig.link, &mut rig.display, &mut rig.sink, &mut ScriptedDelay::new());

    assert_eq!(reason, ExitReason::EmergencyStop);
    assert_eq!(rig.link.wire, [7, 0]);
    assert_eq!(rig.sink.count(&AppEvent::LinkLost), 0);
}

#[test]
fn failed_writes_are_not_retried() {
    let pad = Pad::new();
    let mut control = pad.control_loop();
    let mut rig = Rig::new();
    rig.link.fail_writes = true;

    pad.up.press();
    control.tick(&mut rig.link, &mut rig.display, &mut rig.sink);
    control.tick(&mut rig.link, &mut rig.display, &mut rig.sink);

    rig.link.fail_writes = false;
    control.tick(&mut rig.link, &mut rig.display, &mut rig.sink);

    assert!(rig.link.wire.is_empty());
    assert_eq!(control.packets_sent(), 1);
    assert_eq!(rig.sink.count(&AppEvent::PacketSent(Packet::bare(Command::Up))), 1);
}
