//! Rubbish Remote Firmware — Main Entry Point
//!
//! Hexagonal layout: the control loop only sees port traits, everything
//! touching hardware lives in adapters wired up here.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  PinInput ×7    DialEncoder    Buzzer       Hc05Link     │
//! │  (InputSource)  (CounterPort)  (Feedback)   (Link)       │
//! │  ConsoleDisplay                LogEventSink              │
//! │  (DisplayPort)                 (EventSink)               │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │     establish_link ─▶ ControlLoop (pure logic)     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, IOPin, Input, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;

use rubbish_remote::adapters::display::ConsoleDisplay;
use rubbish_remote::adapters::gpio_input::PinInput;
use rubbish_remote::adapters::hc05_link::Hc05Link;
use rubbish_remote::adapters::log_sink::LogEventSink;
use rubbish_remote::app::control_loop::{ControlLoop, ControllerInputs};
use rubbish_remote::app::events::ExitReason;
use rubbish_remote::app::startup::establish_link;
use rubbish_remote::config::RemoteConfig;
use rubbish_remote::drivers::buzzer::Buzzer;
use rubbish_remote::drivers::dial::{DIAL, DialEncoder};
use rubbish_remote::drivers::hw_init;
use rubbish_remote::pins;

type Button = PinInput<PinDriver<'static, AnyIOPin, Input>>;

/// Button to ground with the internal pull-up: pressed reads low.
fn button(pin: AnyIOPin) -> Result<Button> {
    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(Pull::Up)?;
    Ok(PinInput::active_low(driver))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Rubbish Remote v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = RemoteConfig::load()?;
    info!("Robot address {}", config.robot_address);

    // ── 3. Raw peripherals (dial, buzzer) ─────────────────────
    hw_init::init_peripherals()?;
    if let Err(e) = hw_init::init_isr_service() {
        // Without the ISR the dial is stuck at zero; the rest still works.
        warn!("ISR service init failed: {}, power dial disabled", e);
    }

    // ── 4. HAL-owned peripherals (buttons, radio) ─────────────
    let peripherals = Peripherals::take()?;
    let p = peripherals.pins;

    let inputs = ControllerInputs {
        emergency_stop: button(p.gpio1.downgrade())?,
        up: button(p.gpio4.downgrade())?,
        down: button(p.gpio5.downgrade())?,
        left: button(p.gpio6.downgrade())?,
        right: button(p.gpio7.downgrade())?,
        grab: button(p.gpio15.downgrade())?,
        place: button(p.gpio16.downgrade())?,
    };

    let uart = UartDriver::new(
        peripherals.uart1,
        p.gpio17,
        p.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(pins::BT_UART_BAUD)),
    )?;
    let mut state = PinDriver::input(p.gpio21.downgrade())?;
    state.set_pull(Pull::Down)?;
    let mut link = Hc05Link::new(uart, state, FreeRtos);

    // ── 5. Link bring-up ──────────────────────────────────────
    let mut buzzer = Buzzer::new();
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;

    let polls = establish_link(&config, &mut link, &mut buzzer, &mut delay, &mut sink)
        .inspect_err(|e| error!("Link bring-up failed: {}", e))?;
    info!("Link up after {} polls", polls);

    // ── 6. Control loop ───────────────────────────────────────
    let mut display = ConsoleDisplay::new();
    let mut control = ControlLoop::new(inputs, DialEncoder::new(&DIAL));

    match control.run(&mut link, &mut display, &mut sink, &mut delay) {
        ExitReason::EmergencyStop => warn!("Emergency stop sent, remote halted"),
        ExitReason::Disconnected => warn!("disconnected"),
    }

    // Nothing left to do until the next power cycle.
    loop {
        FreeRtos::delay_ms(1_000);
    }
}
