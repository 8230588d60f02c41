//! One-shot hardware peripheral initialization.
//!
//! Configures the dial encoder inputs and their interrupts, and the LEDC
//! timer/channel behind the buzzer, using raw ESP-IDF sys calls. Called
//! once from `main()` before the link comes up. Buttons and the radio UART
//! are owned by `esp-idf-hal` drivers constructed in `main()` instead.

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use esp_idf_sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use log::info;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use crate::pins;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_dial_inputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Dial encoder inputs ───────────────────────────────────────

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_dial_inputs() -> Result<(), HwInitError> {
    for &pin in &[pins::DIAL_A_GPIO, pins::DIAL_B_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: dial inputs configured (A={}, B={})", pins::DIAL_A_GPIO, pins::DIAL_B_GPIO);
    Ok(())
}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from main and ISR context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── LEDC PWM (buzzer) ─────────────────────────────────────────

#[cfg(all(target_os = "espidf", feature = "espidf"))]
const BUZZER_LEDC_TIMER: ledc_timer_t = ledc_timer_t_LEDC_TIMER_0;
#[cfg(all(target_os = "espidf", feature = "espidf"))]
const BUZZER_LEDC_CHANNEL: ledc_channel_t = ledc_channel_t_LEDC_CHANNEL_0;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: BUZZER_LEDC_TIMER,
        duty_resolution: pins::BUZZER_PWM_RESOLUTION_BITS,
        freq_hz: 440,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: BUZZER_LEDC_CHANNEL,
            timer_sel: BUZZER_LEDC_TIMER,
            gpio_num: pins::BUZZER_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    info!("hw_init: LEDC configured (buzzer=CH0 on GPIO {})", pins::BUZZER_GPIO);
    Ok(())
}

/// Start a square wave at `freq_hz` on the buzzer (50% duty).
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn buzzer_start(freq_hz: u32) {
    let half_scale = 1u32 << (pins::BUZZER_PWM_RESOLUTION_BITS - 1);
    // SAFETY: LEDC timer/channel were configured in init_ledc(); only the
    // main task drives the buzzer.
    unsafe {
        ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, BUZZER_LEDC_TIMER, freq_hz);
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, BUZZER_LEDC_CHANNEL, half_scale);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, BUZZER_LEDC_CHANNEL);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn buzzer_start(_freq_hz: u32) {}

/// Silence the buzzer.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn buzzer_stop() {
    // SAFETY: see buzzer_start.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, BUZZER_LEDC_CHANNEL, 0);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, BUZZER_LEDC_CHANNEL);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn buzzer_stop() {}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe extern "C" fn dial_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let a = unsafe { gpio_get_level(pins::DIAL_A_GPIO) } != 0;
    let b = unsafe { gpio_get_level(pins::DIAL_B_GPIO) } != 0;
    crate::drivers::dial::dial_isr_handler(a, b);
}

/// Install per-pin GPIO ISR service and register the dial handlers.
/// Call after init_peripherals() and before the control loop.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler below only
    // touches the dial's atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Seed with the resting position so the first edge counts correctly.
        crate::drivers::dial::DIAL.seed(
            gpio_read(pins::DIAL_A_GPIO),
            gpio_read(pins::DIAL_B_GPIO),
        );

        for &pin in &[pins::DIAL_A_GPIO, pins::DIAL_B_GPIO] {
            let ret = gpio_isr_handler_add(pin, Some(dial_gpio_isr), core::ptr::null_mut());
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrInstallFailed(ret));
            }
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (dial A/B)");
    }
    Ok(())
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
