//! Audio protocol driver for the serial MP3 module.
//!
//! [`frame`] owns the byte layout and checksum; [`player`] turns
//! high-level requests (play, volume, stop) into paced frame writes.

pub mod frame;
pub mod player;

pub use frame::{Command, FRAME_LEN, Frame};
pub use player::AudioPlayer;
