//! Peripheral drivers and one-shot hardware initialisation.

pub mod buzzer;
pub mod dial;
pub mod hw_init;
