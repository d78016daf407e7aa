//! System configuration parameters
//!
//! All tuning for the Bigmouth controller.  These are compile-time
//! choices: the constants below are the shipped values and
//! [`SystemConfig::default`] is built from them.  Nothing is read from
//! flash or accepted at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// --- Input ---
/// Hold time that separates a tap (play) from a hold (next track).
pub const LONG_PRESS_MS: u32 = 500;
/// Poll period while waiting for the button to be released.
pub const RELEASE_POLL_MS: u32 = 10;

// --- Tracks ---
/// Highest track number on the SD card; selection wraps back to 1 after this.
pub const MAX_TRACK: u8 = 7;
/// In sensor mode the track cannot be chosen, this one always plays.
pub const SENSOR_MODE_TRACK: u8 = 1;

// --- MP3 module ---
pub const MUSIC_VOLUME: u8 = 30;
pub const ANNOUNCER_VOLUME: u8 = 10;
/// Folder "01" on the SD card.
pub const MUSIC_FOLDER: u8 = 1;
/// Folder "02" on the SD card.
pub const ANNOUNCER_FOLDER: u8 = 2;
/// File "02/099.mp3" says "sensor mode".
pub const SENSOR_MODE_ANNOUNCER_TRACK: u8 = 99;
/// Quiet time before and after every frame; the module drops commands
/// that arrive while it is still processing the previous one.
pub const FRAME_SETTLE_MS: u32 = 50;

// --- Light sensor ---
/// Change in normalised light level that counts as "someone walked past".
pub const LIGHT_TRIGGER_THRESHOLD: f32 = 0.04;
/// Raw ADC reading that maps to a normalised level of 0.
pub const LIGHT_FULL_SCALE_RAW: f32 = 2500.0;

// --- Timing ---
pub const BUTTON_POLL_MS: u32 = 50;
pub const SENSOR_POLL_MS: u32 = 200;
/// Time for the user to step away after choosing sensor mode.
pub const SENSOR_SETTLE_MS: u32 = 2000;
pub const POST_ANNOUNCE_MS: u32 = 1000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Input ---
    pub long_press_ms: u32,
    pub release_poll_ms: u32,

    // --- Tracks ---
    pub max_track: u8,
    pub sensor_mode_track: u8,

    // --- MP3 module ---
    /// Music volume (0-30)
    pub music_volume: u8,
    /// Announcer volume (0-30)
    pub announcer_volume: u8,
    pub music_folder: u8,
    pub announcer_folder: u8,
    pub sensor_mode_announcer_track: u8,
    pub frame_settle_ms: u32,

    // --- Light sensor ---
    pub light_trigger_threshold: f32,
    pub light_full_scale_raw: f32,

    // --- Timing ---
    pub button_poll_ms: u32,
    pub sensor_poll_ms: u32,
    pub sensor_settle_ms: u32,
    pub post_announce_ms: u32,

    // --- Debug ---
    /// Bench override: play this track back-to-back, ignoring inputs.
    pub autoplay_track: Option<u8>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            release_poll_ms: RELEASE_POLL_MS,

            max_track: MAX_TRACK,
            sensor_mode_track: SENSOR_MODE_TRACK,

            music_volume: MUSIC_VOLUME,
            announcer_volume: ANNOUNCER_VOLUME,
            music_folder: MUSIC_FOLDER,
            announcer_folder: ANNOUNCER_FOLDER,
            sensor_mode_announcer_track: SENSOR_MODE_ANNOUNCER_TRACK,
            frame_settle_ms: FRAME_SETTLE_MS,

            light_trigger_threshold: LIGHT_TRIGGER_THRESHOLD,
            light_full_scale_raw: LIGHT_FULL_SCALE_RAW,

            button_poll_ms: BUTTON_POLL_MS,
            sensor_poll_ms: SENSOR_POLL_MS,
            sensor_settle_ms: SENSOR_SETTLE_MS,
            post_announce_ms: POST_ANNOUNCE_MS,

            autoplay_track: None,
        }
    }
}

impl SystemConfig {
    /// Reject combinations the control loop cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_track == 0 {
            return Err(ConfigError("max_track must be at least 1"));
        }
        if self.sensor_mode_track == 0 || self.sensor_mode_track > self.max_track {
            return Err(ConfigError("sensor_mode_track outside 1..=max_track"));
        }
        if let Some(track) = self.autoplay_track {
            if track == 0 || track > self.max_track {
                return Err(ConfigError("autoplay_track outside 1..=max_track"));
            }
        }
        if self.music_volume > 30 || self.announcer_volume > 30 {
            return Err(ConfigError("volume above 30"));
        }
        if self.music_folder == 0 || self.announcer_folder == 0 {
            return Err(ConfigError("folder indices start at 1"));
        }
        if self.sensor_mode_announcer_track == 0 {
            return Err(ConfigError("announcer track indices start at 1"));
        }
        if self.long_press_ms == 0 || self.release_poll_ms == 0 {
            return Err(ConfigError("button timings must be non-zero"));
        }
        if !(self.light_trigger_threshold > 0.0 && self.light_trigger_threshold < 1.0) {
            return Err(ConfigError("light_trigger_threshold outside (0, 1)"));
        }
        if self.light_full_scale_raw <= 0.0 {
            return Err(ConfigError("light_full_scale_raw must be positive"));
        }
        Ok(())
    }
}
