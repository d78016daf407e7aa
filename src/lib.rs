//! Bigmouth firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod actuators;
pub mod app;
pub mod audio;
pub mod choreography;
pub mod config;
pub mod error;
pub mod pins;
pub mod trigger;

// Hardware-facing modules; the ESP-IDF halves are cfg-gated inside.
pub mod adapters;
pub mod drivers;
