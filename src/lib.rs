//! Rubbish-robot remote firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(all(target_os = "espidf", feature = "espidf"))]` within each
//! module, so the library builds for the device target without the
//! `espidf` feature and falls back to the simulation stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod protocol;

// Hardware-facing modules compile on the host too; the real peripheral
// access inside them is cfg-gated.
pub mod adapters;
pub mod drivers;
