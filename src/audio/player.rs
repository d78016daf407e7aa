//! MP3 module driver.
//!
//! Builds [`Frame`]s and pushes them down a [`SerialPort`].  Every frame
//! is bracketed by a fixed settle delay: the module silently drops a
//! command that arrives while it is still handling the previous one, and
//! there is no acknowledgement to detect that.  The delay is part of the
//! protocol, not a tuning knob.
//!
//! Write failures are logged and otherwise ignored; there is no retry.

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use super::frame::{Command, Frame};
use crate::app::ports::SerialPort;

/// Highest volume the module accepts.
pub const MAX_VOLUME: u8 = 30;

pub struct AudioPlayer<S> {
    serial: S,
    settle_ms: u32,
    frames_sent: u32,
}

impl<S: SerialPort> AudioPlayer<S> {
    pub fn new(serial: S, settle_ms: u32) -> Self {
        Self {
            serial,
            settle_ms,
            frames_sent: 0,
        }
    }

    /// Send one raw command.
    pub fn send(&mut self, command: Command, data: u16, delay: &mut impl DelayNs) {
        let frame = Frame::new(command, data);
        debug!("mp3 tx {:?}: {}", command, frame.to_hex());

        delay.delay_ms(self.settle_ms);
        if let Err(e) = self.serial.write(frame.as_bytes()) {
            warn!("mp3 tx {:?} failed: {}", command, e);
        }
        self.frames_sent = self.frames_sent.wrapping_add(1);
        delay.delay_ms(self.settle_ms);
    }

    /// Play `track` from `folder` once (repeat is disabled first).
    pub fn play_track(&mut self, folder: u8, track: u8, delay: &mut impl DelayNs) {
        debug_assert!(folder >= 1 && track >= 1, "folder/track indices start at 1");
        self.disable_repeat(delay);
        let data = (u16::from(folder) << 8) | u16::from(track);
        self.send(Command::PlayFolderTrack, data, delay);
    }

    /// Play by global file index (cards without numbered folders).
    pub fn play_index(&mut self, index: u16, delay: &mut impl DelayNs) {
        self.send(Command::PlayIndex, index, delay);
    }

    /// Set output volume, clamped to `0..=30`.
    pub fn set_volume(&mut self, level: u8, delay: &mut impl DelayNs) {
        let clamped = level.min(MAX_VOLUME);
        if clamped != level {
            warn!("volume {} clamped to {}", level, MAX_VOLUME);
        }
        self.send(Command::SetVolume, u16::from(clamped), delay);
    }

    pub fn disable_repeat(&mut self, delay: &mut impl DelayNs) {
        self.send(Command::RepeatPlay, 0, delay);
    }

    pub fn stop(&mut self, delay: &mut impl DelayNs) {
        self.send(Command::Stop, 0, delay);
    }

    /// Frames handed to the serial port since construction.
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }
}
