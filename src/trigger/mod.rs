//! Trigger state machine: decides when a performance starts.
//!
//! ## Modes
//!
//! The mode is chosen once at power-on and never changes:
//!
//! | Button at boot | Mode     | Play trigger          | Track          |
//! |----------------|----------|-----------------------|----------------|
//! | released       | `Button` | short press           | long press cycles |
//! | held           | `Sensor` | light level jump      | fixed          |
//!
//! ## Press classification
//!
//! Polling only, no timer or interrupt.  When a poll sees the button down
//! it blocks for the long-press window and samples once more:
//!
//! ```text
//!  pressed ──▶ AwaitingRelease ──(window)──▶ released? ──yes──▶ Armed ──▶ Play
//!                                               │
//!                                               no ──▶ wait for release ──▶ AdvanceTrack
//! ```
//!
//! However long the hold lasts past the window, it is one `AdvanceTrack`.
//!
//! The caller marks the performance with [`TriggerMachine::begin_performance`]
//! and [`TriggerMachine::end_performance`]; while `Performing`, polls
//! report nothing.

pub mod light;
pub mod selection;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::InputPort;
use crate::config::SystemConfig;
pub use light::LightBaseline;
pub use selection::TrackSelection;

/// Operating mode, fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Button,
    Sensor,
}

/// Where the machine is in the trigger → performance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// Button seen down; deciding between tap and hold.
    AwaitingRelease,
    /// A `Play` was emitted and the performance has not started yet.
    Armed,
    Performing,
}

/// Output of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Perform this track now.
    Play(u8),
    /// Selection moved to this track; announce it.
    AdvanceTrack(u8),
}

/// Read the button once to pick the mode.
pub fn select_mode(input: &mut impl InputPort) -> TriggerMode {
    if input.button_pressed() {
        TriggerMode::Sensor
    } else {
        TriggerMode::Button
    }
}

/// Block until the button is released, sampling every `poll_ms`.
pub fn wait_for_release(input: &mut impl InputPort, clock: &mut impl DelayNs, poll_ms: u32) {
    while input.button_pressed() {
        clock.delay_ms(poll_ms);
    }
}

pub struct TriggerMachine {
    mode: TriggerMode,
    state: TriggerState,
    selection: TrackSelection,
    baseline: LightBaseline,
    long_press_ms: u32,
    release_poll_ms: u32,
}

impl TriggerMachine {
    /// Button mode, starting at track 1.
    pub fn button_mode(config: &SystemConfig) -> Self {
        Self {
            mode: TriggerMode::Button,
            state: TriggerState::Idle,
            selection: TrackSelection::new(config.max_track),
            baseline: LightBaseline::new(0.0, config.light_trigger_threshold),
            long_press_ms: config.long_press_ms,
            release_poll_ms: config.release_poll_ms,
        }
    }

    /// Sensor mode, locked to the sensor-mode track, comparing against
    /// `initial_level` on the first poll.
    pub fn sensor_mode(config: &SystemConfig, initial_level: f32) -> Self {
        Self {
            mode: TriggerMode::Sensor,
            state: TriggerState::Idle,
            selection: TrackSelection::starting_at(config.sensor_mode_track, config.max_track),
            baseline: LightBaseline::new(initial_level, config.light_trigger_threshold),
            long_press_ms: config.long_press_ms,
            release_poll_ms: config.release_poll_ms,
        }
    }

    /// Sample the inputs once.  May block: for the long-press window and
    /// for the rest of a hold.
    pub fn poll(
        &mut self,
        input: &mut impl InputPort,
        clock: &mut impl DelayNs,
    ) -> Option<TriggerEvent> {
        if self.state == TriggerState::Performing {
            return None;
        }
        match self.mode {
            TriggerMode::Button => self.poll_button(input, clock),
            TriggerMode::Sensor => self.poll_sensor(input),
        }
    }

    fn poll_button(
        &mut self,
        input: &mut impl InputPort,
        clock: &mut impl DelayNs,
    ) -> Option<TriggerEvent> {
        if !input.button_pressed() {
            self.state = TriggerState::Idle;
            return None;
        }

        self.state = TriggerState::AwaitingRelease;
        clock.delay_ms(self.long_press_ms);

        if !input.button_pressed() {
            self.state = TriggerState::Armed;
            debug!("short press: play track {}", self.selection.current());
            return Some(TriggerEvent::Play(self.selection.current()));
        }

        wait_for_release(input, clock, self.release_poll_ms);
        let track = self.selection.advance();
        self.state = TriggerState::Idle;
        debug!("long press: track -> {}", track);
        Some(TriggerEvent::AdvanceTrack(track))
    }

    fn poll_sensor(&mut self, input: &mut impl InputPort) -> Option<TriggerEvent> {
        let level = input.light_level();
        let before = self.baseline.level();
        if self.baseline.observe(level) {
            self.state = TriggerState::Armed;
            debug!("light {:.3} -> {:.3}: play", before, level);
            return Some(TriggerEvent::Play(self.selection.current()));
        }
        self.state = TriggerState::Idle;
        None
    }

    /// Step the selection without a button hold.  Sensor mode is locked
    /// to its track, so this returns `None` there.
    pub fn advance_track(&mut self) -> Option<u8> {
        match self.mode {
            TriggerMode::Button => Some(self.selection.advance()),
            TriggerMode::Sensor => None,
        }
    }

    /// The control loop has started the performance.
    pub fn begin_performance(&mut self) {
        self.state = TriggerState::Performing;
    }

    /// The performance (script and stop command) is over.
    pub fn end_performance(&mut self) {
        self.state = TriggerState::Idle;
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn current_track(&self) -> u8 {
        self.selection.current()
    }

    pub fn baseline(&self) -> f32 {
        self.baseline.level()
    }
}
