//! Fixed-length command frame for the serial MP3 module.
//!
//! Wire format (big-endian 16-bit fields):
//! ```text
//! ┌──────┬─────────┬────────┬─────┬──────────┬─────────┬──────────┬────────┐
//! │ 0x7E │ VER 0xFF│ LEN 06 │ CMD │ FBK 0x01 │ DATA hi │ DATA lo  │ ...    │
//! ├──────┴─────────┴────────┴─────┴──────────┴─────────┴──────────┴────────┤
//! │ ... CHK hi │ CHK lo │ 0xEF                                             │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checksum is the two's-complement negation of the sum of bytes 1..=6,
//! truncated to 16 bits.  It is a structural integrity check only; the
//! module's replies are never read.

use core::fmt::Write as _;

use crate::error::FrameError;

/// Total frame length in bytes.
pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const FEEDBACK: u8 = 0x01;
const END: u8 = 0xEF;

/// Commands this firmware sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Play by global file index (single-folder cards).
    PlayIndex = 0x03,
    /// Set volume, data = 0..=30.
    SetVolume = 0x06,
    /// Play `folder << 8 | track`.
    PlayFolderTrack = 0x0F,
    /// Repeat-play toggle; data 0 disables.
    RepeatPlay = 0x11,
    /// Stop playback.
    Stop = 0x16,
}

impl Command {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    pub fn from_u8(opcode: u8) -> Option<Self> {
        match opcode {
            0x03 => Some(Self::PlayIndex),
            0x06 => Some(Self::SetVolume),
            0x0F => Some(Self::PlayFolderTrack),
            0x11 => Some(Self::RepeatPlay),
            0x16 => Some(Self::Stop),
            _ => None,
        }
    }
}

/// Checksum over the six payload bytes (version through data-low).
pub fn checksum(payload: &[u8]) -> u16 {
    let sum = payload
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
    sum.wrapping_neg()
}

/// A complete, checksummed frame ready for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    pub fn new(command: Command, data: u16) -> Self {
        let [data_hi, data_lo] = data.to_be_bytes();
        let mut bytes = [
            START,
            VERSION,
            LENGTH,
            command.opcode(),
            FEEDBACK,
            data_hi,
            data_lo,
            0,
            0,
            END,
        ];
        let [chk_hi, chk_lo] = checksum(&bytes[1..7]).to_be_bytes();
        bytes[7] = chk_hi;
        bytes[8] = chk_lo;
        Self { bytes }
    }

    /// Decode and verify a frame received (or captured) off the wire.
    pub fn parse(raw: &[u8]) -> Result<Self, FrameError> {
        let bytes: [u8; FRAME_LEN] = raw
            .try_into()
            .map_err(|_| FrameError::Length(raw.len()))?;

        if bytes[0] != START {
            return Err(FrameError::StartMarker(bytes[0]));
        }
        if bytes[9] != END {
            return Err(FrameError::EndMarker(bytes[9]));
        }
        if bytes[1] != VERSION {
            return Err(FrameError::Version(bytes[1]));
        }
        if bytes[2] != LENGTH {
            return Err(FrameError::LengthField(bytes[2]));
        }
        if Command::from_u8(bytes[3]).is_none() {
            return Err(FrameError::UnknownCommand(bytes[3]));
        }
        if bytes[4] != FEEDBACK {
            return Err(FrameError::Feedback(bytes[4]));
        }

        let expected = checksum(&bytes[1..7]);
        let found = u16::from_be_bytes([bytes[7], bytes[8]]);
        if expected != found {
            return Err(FrameError::Checksum { expected, found });
        }

        Ok(Self { bytes })
    }

    pub fn command(&self) -> Command {
        // Both constructors guarantee a known opcode.
        Command::from_u8(self.bytes[3]).unwrap_or(Command::Stop)
    }

    pub fn data(&self) -> u16 {
        u16::from_be_bytes([self.bytes[5], self.bytes[6]])
    }

    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([self.bytes[7], self.bytes[8]])
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Space-separated upper-case hex, for debug logs.
    pub fn to_hex(&self) -> heapless::String<32> {
        let mut s = heapless::String::new();
        for (i, b) in self.bytes.iter().enumerate() {
            let sep = if i == 0 { "" } else { " " };
            // 10 × "XX" + 9 spaces = 29 chars, always fits.
            let _ = write!(s, "{sep}{b:02X}");
        }
        s
    }
}
