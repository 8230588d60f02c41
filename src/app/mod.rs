//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules that turn button and dial activity into
//! robot commands: edge detection, the per-tick command priority, power
//! deadbanding, and link bring-up. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod control_loop;
pub mod events;
pub mod input;
pub mod ports;
pub mod power;
pub mod startup;
