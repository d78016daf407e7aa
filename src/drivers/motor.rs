//! Two-line H-bridge motor driver (L298N-style).
//!
//! Direction is set by two GPIO lines; a third line carries PWM that is
//! held at full duty and used purely as an enable.  Speed is never
//! modulated.
//!
//! ## Dual-target design
//!
//! Generic over `embedded-hal` pins: on ESP-IDF these are `PinDriver`s
//! and an `LedcDriver`; on host/test they are in-memory mocks.
//!
//! Pin errors are logged and swallowed.  A direction write has no
//! meaningful recovery mid-song.

use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::warn;

use crate::actuators::DirectionCode;

pub struct HBridge<A, B> {
    label: &'static str,
    in1: A,
    in2: B,
    code: DirectionCode,
}

impl<A: OutputPin, B: OutputPin> HBridge<A, B> {
    /// Take ownership of the direction lines and drive them to coast.
    pub fn new(label: &'static str, in1: A, in2: B) -> Self {
        let mut bridge = Self {
            label,
            in1,
            in2,
            code: DirectionCode::Coast,
        };
        bridge.drive(DirectionCode::Coast);
        bridge
    }

    /// Apply a direction code to both lines.
    pub fn drive(&mut self, code: DirectionCode) {
        let (l1, l2) = code.lines();
        // Lower before raising, so both lines are never HIGH together.
        if !l1 {
            Self::write(self.label, &mut self.in1, false);
        }
        if !l2 {
            Self::write(self.label, &mut self.in2, false);
        }
        if l1 {
            Self::write(self.label, &mut self.in1, true);
        }
        if l2 {
            Self::write(self.label, &mut self.in2, true);
        }
        self.code = code;
    }

    pub fn code(&self) -> DirectionCode {
        self.code
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn write<P: OutputPin>(label: &'static str, pin: &mut P, high: bool) {
        let result = if high { pin.set_high() } else { pin.set_low() };
        if let Err(e) = result {
            warn!("{} motor: direction write failed ({:?})", label, e.kind());
        }
    }
}

/// Hold an enable line at 100% duty.
pub fn enable_full_duty<P: SetDutyCycle>(label: &'static str, pwm: &mut P) {
    if let Err(e) = pwm.set_duty_cycle_fully_on() {
        warn!("{} motor: enable PWM failed ({:?})", label, e.kind());
    }
}
