//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART on the device).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode, track } => {
                info!("START | mode={:?} track={}", mode, track);
            }
            AppEvent::TrackSelected { track, title } => {
                info!("TRACK | {} \"{}\"", track, title.unwrap_or("untitled"));
            }
            AppEvent::PerformanceStarted { track } => {
                info!("PLAY  | track={}", track);
            }
            AppEvent::ScriptMissing { track } => {
                warn!("SCRIPT| none for track {}, audio only", track);
            }
            AppEvent::PerformanceFinished { track, report } => {
                info!(
                    "DONE  | track={} steps={} scheduled={}ms",
                    track, report.steps_executed, report.scheduled_ms
                );
            }
        }
    }
}
