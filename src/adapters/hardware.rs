//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! [`MotorPair`] owns both H-bridges and implements [`ActuatorPort`];
//! [`PanelInputs`] owns the button and LDR and implements [`InputPort`].
//! These are the only types that touch GPIO.  Everything is generic over
//! `embedded-hal`, so the same code runs against `esp-idf-hal` pins on
//! the device and mock pins on the host.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use log::warn;

use crate::actuators::{DirectionCode, LimbState, MouthState};
use crate::app::ports::{ActuatorPort, InputPort};
use crate::drivers::light_sensor::{AnalogSource, LightSensor};
use crate::drivers::motor::HBridge;

// ── Actuators ─────────────────────────────────────────────────

/// Head/tail motor plus mouth motor.
pub struct MotorPair<LA, LB, MA, MB> {
    limb: HBridge<LA, LB>,
    mouth: HBridge<MA, MB>,
}

impl<LA, LB, MA, MB> MotorPair<LA, LB, MA, MB>
where
    LA: OutputPin,
    LB: OutputPin,
    MA: OutputPin,
    MB: OutputPin,
{
    pub fn new(limb: HBridge<LA, LB>, mouth: HBridge<MA, MB>) -> Self {
        Self { limb, mouth }
    }

    pub fn limb_code(&self) -> DirectionCode {
        self.limb.code()
    }

    pub fn mouth_code(&self) -> DirectionCode {
        self.mouth.code()
    }
}

impl<LA, LB, MA, MB> ActuatorPort for MotorPair<LA, LB, MA, MB>
where
    LA: OutputPin,
    LB: OutputPin,
    MA: OutputPin,
    MB: OutputPin,
{
    fn set_limb(&mut self, state: LimbState) {
        self.limb.drive(state.direction());
    }

    fn set_mouth(&mut self, state: MouthState) {
        self.mouth.drive(state.direction());
    }

    fn rest_all(&mut self) {
        self.limb.drive(DirectionCode::Coast);
        self.mouth.drive(DirectionCode::Coast);
    }
}

// ── Inputs ────────────────────────────────────────────────────

/// Active-low push-button plus LDR.
pub struct PanelInputs<B, S> {
    button: B,
    light: LightSensor<S>,
}

impl<B: InputPin, S: AnalogSource> PanelInputs<B, S> {
    pub fn new(button: B, light: LightSensor<S>) -> Self {
        Self { button, light }
    }
}

impl<B: InputPin, S: AnalogSource> InputPort for PanelInputs<B, S> {
    fn button_pressed(&mut self) -> bool {
        // Pulled up; pressing shorts to ground.
        match self.button.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("button read failed ({:?}), treating as released", e.kind());
                false
            }
        }
    }

    fn light_level(&mut self) -> f32 {
        self.light.level()
    }
}
