//! GPIO / peripheral pin assignments for the remote's main board.
//!
//! Raw-register drivers (dial, buzzer) read their pins from here. The
//! HAL-owned pins are taken as typed `Pins` fields in `main()`, which is
//! the only place they are named:
//!
//! | Signal           | GPIO | Wiring                          |
//! |------------------|------|---------------------------------|
//! | Emergency stop   | 1    | latching switch, active-low     |
//! | Up               | 4    | active-low, internal pull-up    |
//! | Down             | 5    | active-low, internal pull-up    |
//! | Left             | 6    | active-low, internal pull-up    |
//! | Right            | 7    | active-low, internal pull-up    |
//! | Grab             | 15   | touch button, active-low        |
//! | Place            | 16   | touch button, active-low        |
//! | HC-05 UART TX    | 17   | UART1                           |
//! | HC-05 UART RX    | 18   | UART1                           |
//! | HC-05 STATE      | 21   | high while linked, pull-down    |

// ---------------------------------------------------------------------------
// Power dial (quadrature encoder)
// ---------------------------------------------------------------------------

/// Encoder channel A, interrupt on any edge.
pub const DIAL_A_GPIO: i32 = 8;
/// Encoder channel B, interrupt on any edge.
pub const DIAL_B_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the piezo.
pub const BUZZER_GPIO: i32 = 10;
/// LEDC timer resolution (bits). 50% duty = half of full scale.
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// HC-05 Bluetooth module (UART1)
// ---------------------------------------------------------------------------

/// HC-05 command-mode baud rate (KEY held high at power-up).
pub const BT_UART_BAUD: u32 = 38_400;
