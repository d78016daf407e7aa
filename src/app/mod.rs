//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop for the singing fish: boot-time
//! mode selection, trigger handling, and the play → choreograph → stop
//! cycle.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
