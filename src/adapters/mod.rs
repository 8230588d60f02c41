//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements    | Connects to                    |
//! |--------------|---------------|--------------------------------|
//! | `gpio_input` | InputSource   | Button GPIOs (embedded-hal)    |
//! | `hardware`   | CounterPort   | Dial quadrature decoder        |
//! |              | FeedbackPort  | LEDC buzzer                    |
//! | `hc05_link`  | Link          | HC-05 Bluetooth module on UART |
//! | `display`    | DisplayPort   | Serial log                     |
//! | `log_sink`   | EventSink     | Serial log output              |

pub mod display;
pub mod gpio_input;
pub mod hardware;
pub mod hc05_link;
pub mod log_sink;
