//! LDR light sensor on an ADC channel.
//!
//! `embedded-hal` 1.0 has no ADC trait, so the raw sample comes from an
//! [`AnalogSource`] implemented by the platform adapter.

use crate::trigger::light::normalize;

/// Something that yields raw ADC counts.
pub trait AnalogSource {
    fn read_raw(&mut self) -> u16;
}

impl<F: FnMut() -> u16> AnalogSource for F {
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

pub struct LightSensor<S> {
    source: S,
    full_scale_raw: f32,
    last_raw: u16,
}

impl<S: AnalogSource> LightSensor<S> {
    pub fn new(source: S, full_scale_raw: f32) -> Self {
        Self {
            source,
            full_scale_raw,
            last_raw: 0,
        }
    }

    /// Sample and normalise to `[0, 1]`.
    pub fn level(&mut self) -> f32 {
        self.last_raw = self.source.read_raw();
        normalize(self.last_raw, self.full_scale_raw)
    }

    /// Raw counts from the most recent [`level`](Self::level) call.
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }
}
