//! Ambient-light trigger.
//!
//! Someone walking past the prop shades the LDR.  We don't look for an
//! absolute level, only a jump relative to the previous poll, and the
//! reference moves to every new reading.  A slow drift (sunset, a lamp
//! warming up) is therefore tracked step by step and never adds up to a
//! trigger.

/// Map a raw ADC reading onto `[0, 1]`, 1 being bright.
///
/// The LDR pulls the ADC input *down* as light increases, so the scale is
/// inverted: `clamp(1 - raw / full_scale, 0, 1)`.
pub fn normalize(raw: u16, full_scale: f32) -> f32 {
    (1.0 - f32::from(raw) / full_scale).clamp(0.0, 1.0)
}

/// The light level seen on the previous poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBaseline {
    level: f32,
    threshold: f32,
}

impl LightBaseline {
    pub fn new(initial: f32, threshold: f32) -> Self {
        Self {
            level: initial,
            threshold,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Compare `reading` against the stored level, then store `reading`.
    ///
    /// Returns `true` when the reading moved more than the threshold in
    /// either direction.  The stored level is replaced on every call,
    /// trigger or not.
    pub fn observe(&mut self, reading: f32) -> bool {
        let fired = (reading - self.level).abs() > self.threshold;
        self.level = reading;
        fired
    }
}
