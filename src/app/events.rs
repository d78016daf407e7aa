//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; on the device they go to the serial
//! log.

use crate::choreography::RunReport;
use crate::trigger::TriggerMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Boot finished; the loop is about to start.
    Started { mode: TriggerMode, track: u8 },

    /// A track was selected and its name announced.
    TrackSelected {
        track: u8,
        title: Option<&'static str>,
    },

    /// Music started; choreography is about to run.
    PerformanceStarted { track: u8 },

    /// No script is catalogued for the track.  The music still plays.
    ScriptMissing { track: u8 },

    /// Script done, music stopped, motors at rest.
    PerformanceFinished { track: u8, report: RunReport },
}
