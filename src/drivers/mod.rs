//! Peripheral drivers, generic over `embedded-hal` traits.

pub mod light_sensor;
pub mod motor;
