//! Unified error types for the Bigmouth firmware.
//!
//! The runtime is fire-and-forget: nothing here aborts a performance.
//! These types exist so that the few things that *can* go wrong are
//! reported distinctly to logs, events and tests.  All variants are
//! `Copy` so they pass through the control loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No choreography is authored for the requested track.
    Script(ScriptError),
    /// The serial link to the MP3 module rejected a write.
    Serial(SerialError),
    /// A byte sequence is not a well-formed command frame.
    Frame(FrameError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script(e) => write!(f, "script: {e}"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Script lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptError {
    /// The catalogue has no entry for this track.  Playback still happens,
    /// the actor just doesn't move.
    NotDefined { track: u8 },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDefined { track } => write!(f, "no script defined for track {track}"),
        }
    }
}

impl From<ScriptError> for Error {
    fn from(e: ScriptError) -> Self {
        Self::Script(e)
    }
}

// ---------------------------------------------------------------------------
// Serial link
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// The UART driver reported an error.
    WriteFailed,
    /// Fewer bytes were accepted than offered.
    ShortWrite { written: usize },
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "UART write failed"),
            Self::ShortWrite { written } => write!(f, "short write ({written} bytes)"),
        }
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

// ---------------------------------------------------------------------------
// Frame decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Frames are exactly ten bytes.
    Length(usize),
    /// Byte 0 is not `0x7E`.
    StartMarker(u8),
    /// Byte 9 is not `0xEF`.
    EndMarker(u8),
    /// Byte 1 is not `0xFF`.
    Version(u8),
    /// Byte 2 is not `0x06`.
    LengthField(u8),
    /// Byte 3 is not a command this firmware speaks.
    UnknownCommand(u8),
    /// Byte 4 is not `0x01`.
    Feedback(u8),
    /// Stored checksum does not match the payload.
    Checksum { expected: u16, found: u16 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(f, "expected 10 bytes, got {n}"),
            Self::StartMarker(b) => write!(f, "bad start marker 0x{b:02X}"),
            Self::EndMarker(b) => write!(f, "bad end marker 0x{b:02X}"),
            Self::Version(b) => write!(f, "bad version 0x{b:02X}"),
            Self::LengthField(b) => write!(f, "bad length field 0x{b:02X}"),
            Self::UnknownCommand(b) => write!(f, "unknown command 0x{b:02X}"),
            Self::Feedback(b) => write!(f, "bad feedback flag 0x{b:02X}"),
            Self::Checksum { expected, found } => {
                write!(f, "checksum 0x{found:04X}, expected 0x{expected:04X}")
            }
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A config field failed range validation.
/// The `&'static str` describes which field and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError(pub &'static str);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.0)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
