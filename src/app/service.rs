//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the trigger machine, the track catalogue, the MP3
//! player and the injected hardware ports.  It exposes a clean,
//! hardware-agnostic API: [`boot`](AppService::boot) once, then
//! [`tick`](AppService::tick) forever.
//!
//! ```text
//!    InputPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                  │        AppService        │
//! ActuatorPort ◀── │  Trigger · Catalogue     │ ──▶ SerialPort (MP3)
//!                  └──────────────────────────┘
//!                             │
//!                          DelayNs
//! ```
//!
//! Every operation runs to completion on the caller's thread.  A
//! performance blocks for the full length of its script; inputs are not
//! sampled until it returns.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::audio::AudioPlayer;
use crate::choreography::{self, Catalogue, RunReport};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::trigger::{self, TriggerEvent, TriggerMachine, TriggerMode, TriggerState};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, InputPort, SerialPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
///
/// Each port is owned separately so a script can borrow the actuators
/// and the clock at the same time.
pub struct AppService<A, I, S, D> {
    config: SystemConfig,
    catalogue: Catalogue,
    trigger: TriggerMachine,
    actuators: A,
    input: I,
    player: AudioPlayer<S>,
    clock: D,
    performances: u32,
}

impl<A, I, S, D> AppService<A, I, S, D>
where
    A: ActuatorPort,
    I: InputPort,
    S: SerialPort,
    D: DelayNs,
{
    // ── Lifecycle ─────────────────────────────────────────────

    /// Power-on sequence.
    ///
    /// Rests the motors and silences the module, then reads the button
    /// once to choose the trigger mode.  Holding it selects sensor mode:
    /// the mode is announced, the service waits for release plus a
    /// settle period and takes the first light baseline.  Either way the
    /// current track is announced before returning.
    pub fn boot(
        config: SystemConfig,
        catalogue: Catalogue,
        actuators: A,
        input: I,
        serial: S,
        clock: D,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        config.validate()?;

        let player = AudioPlayer::new(serial, config.frame_settle_ms);
        let trigger = TriggerMachine::button_mode(&config);
        let mut app = Self {
            config,
            catalogue,
            trigger,
            actuators,
            input,
            player,
            clock,
            performances: 0,
        };

        app.actuators.rest_all();
        app.player.stop(&mut app.clock);

        if trigger::select_mode(&mut app.input) == TriggerMode::Sensor {
            app.enter_sensor_mode();
        }

        let track = app.trigger.current_track();
        app.announce_track(track, sink);
        app.clock.delay_ms(app.config.post_announce_ms);

        sink.emit(&AppEvent::Started {
            mode: app.trigger.mode(),
            track,
        });
        info!("AppService started in {:?} mode", app.trigger.mode());
        Ok(app)
    }

    fn enter_sensor_mode(&mut self) {
        self.announce_sensor_mode();
        trigger::wait_for_release(&mut self.input, &mut self.clock, self.config.release_poll_ms);
        self.clock.delay_ms(self.config.sensor_settle_ms);
        let baseline = self.input.light_level();
        info!("sensor mode, baseline {:.3}", baseline);
        self.trigger = TriggerMachine::sensor_mode(&self.config, baseline);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One pass of the control loop: poll the trigger, act on what it
    /// reports, then wait out the poll interval.
    ///
    /// With `autoplay_track` set the inputs are ignored and that track is
    /// performed every tick.
    pub fn tick(&mut self, sink: &mut impl EventSink) -> Option<TriggerEvent> {
        let event = match self.config.autoplay_track {
            Some(track) => Some(TriggerEvent::Play(track)),
            None => self.trigger.poll(&mut self.input, &mut self.clock),
        };

        match event {
            Some(TriggerEvent::Play(track)) => {
                self.perform(track, sink);
            }
            Some(TriggerEvent::AdvanceTrack(track)) => self.announce_track(track, sink),
            None => {}
        }

        let pause = self.poll_interval_ms();
        self.clock.delay_ms(pause);
        event
    }

    /// Play `track` with its choreography, then stop and rest.
    ///
    /// A track without a script still plays its audio; the motors stay
    /// at rest for the duration of the (empty) script.  Returns `None`
    /// without touching anything when `track` is outside `1..=max_track`.
    pub fn perform(&mut self, track: u8, sink: &mut impl EventSink) -> Option<RunReport> {
        if track == 0 || track > self.config.max_track {
            warn!("Play({}) ignored: tracks are 1..={}", track, self.config.max_track);
            return None;
        }

        self.trigger.begin_performance();
        sink.emit(&AppEvent::PerformanceStarted { track });

        self.player.set_volume(self.config.music_volume, &mut self.clock);
        self.player.play_track(self.config.music_folder, track, &mut self.clock);

        let report = match self.catalogue.script(track) {
            Ok(script) => choreography::run(script, &mut self.actuators, &mut self.clock),
            Err(e) => {
                warn!("{}", e);
                sink.emit(&AppEvent::ScriptMissing { track });
                RunReport::default()
            }
        };

        self.player.stop(&mut self.clock);
        self.actuators.rest_all();
        self.trigger.end_performance();
        self.performances += 1;

        sink.emit(&AppEvent::PerformanceFinished { track, report });
        Some(report)
    }

    // ── Commands ──────────────────────────────────────────────

    /// Process an injected command.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::Play(track) => {
                self.perform(track, sink);
            }
            AppCommand::AdvanceTrack => match self.trigger.advance_track() {
                Some(track) => self.announce_track(track, sink),
                None => warn!("AdvanceTrack ignored: sensor mode is locked to its track"),
            },
            AppCommand::Stop => {
                info!("stop requested");
                self.player.stop(&mut self.clock);
                self.actuators.rest_all();
            }
        }
    }

    // ── Announcer ─────────────────────────────────────────────

    /// Speak the name of `track` from the announcer folder.
    pub fn announce_track(&mut self, track: u8, sink: &mut impl EventSink) {
        self.player.set_volume(self.config.announcer_volume, &mut self.clock);
        self.player.play_track(self.config.announcer_folder, track, &mut self.clock);
        sink.emit(&AppEvent::TrackSelected {
            track,
            title: self.catalogue.title(track),
        });
    }

    /// Play the "sensor mode" voice clip.
    pub fn announce_sensor_mode(&mut self) {
        self.player.set_volume(self.config.announcer_volume, &mut self.clock);
        self.player.play_track(
            self.config.announcer_folder,
            self.config.sensor_mode_announcer_track,
            &mut self.clock,
        );
    }

    // ── Queries ───────────────────────────────────────────────

    /// Wait between ticks.  Sensor mode adds its slower sampling period
    /// on top of the button interval.
    pub fn poll_interval_ms(&self) -> u32 {
        match self.trigger.mode() {
            TriggerMode::Button => self.config.button_poll_ms,
            TriggerMode::Sensor => self.config.sensor_poll_ms + self.config.button_poll_ms,
        }
    }

    pub fn mode(&self) -> TriggerMode {
        self.trigger.mode()
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn current_track(&self) -> u8 {
        self.trigger.current_track()
    }

    /// Completed performances since boot.
    pub fn performances(&self) -> u32 {
        self.performances
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn serial(&self) -> &S {
        self.player.serial()
    }

    pub fn clock(&self) -> &D {
        &self.clock
    }
}
