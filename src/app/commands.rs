//! Inbound commands to the application service.
//!
//! The physical inputs reach the service through the trigger state
//! machine, and auto-play builds its trigger event directly.  Commands
//! are the same actions requested from outside the control loop; the
//! device firmware never issues them, test harnesses do.

/// Commands that can be injected into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Perform a track now, as if triggered.
    Play(u8),

    /// Select and announce the next track (button mode only).
    AdvanceTrack,

    /// Stop the music and rest the motors.
    Stop,
}
