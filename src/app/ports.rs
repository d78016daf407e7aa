//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (motors, inputs, the MP3 serial link, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Time is not a port of its own: every blocking wait goes through
//! [`embedded_hal::delay::DelayNs`].

use crate::actuators::{LimbState, MouthState};
use crate::error::SerialError;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two effectors.
///
/// Writes are synchronous, unconditional and infallible from the caller's
/// point of view.
pub trait ActuatorPort {
    /// Drive the head/tail motor to `state`.
    fn set_limb(&mut self, state: LimbState);

    /// Drive the mouth motor to `state`.
    fn set_mouth(&mut self, state: MouthState);

    /// Let both motors coast (both direction lines LOW).
    fn rest_all(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the two trigger sources.
pub trait InputPort {
    /// `true` while the push-button is held down.
    fn button_pressed(&mut self) -> bool;

    /// Ambient light, normalised to `[0, 1]` (1 = bright).
    fn light_level(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: domain → MP3 module)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented, write-only link to the MP3 module.  Nothing is ever
/// read back.
pub trait SerialPort {
    /// Transmit `bytes` in order.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
