//! GPIO / peripheral pin assignments for the Bigmouth controller board.
//!
//! The entry point takes typed esp-idf-hal peripherals, so it cannot index
//! pins by number.  Instead it asserts at compile time that each peripheral
//! it takes matches this table, and logs the map at boot.  Changing a pin
//! here without changing `main.rs` fails the build.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Momentary push-button (active-low, internal pull-up).
pub const BUTTON_GPIO: i32 = 4;

/// Light-dependent resistor divider, ADC1 channel 5 on the ESP32.
pub const LDR_GPIO: i32 = 33;
/// ADC1 channel that `LDR_GPIO` maps to.
pub const LDR_ADC_CHANNEL: u32 = 5;

// ---------------------------------------------------------------------------
// Head/tail motor (shared bidirectional limb actuator)
// ---------------------------------------------------------------------------

/// Direction line 1.  HIGH with line 2 LOW = tail out.
pub const LIMB_MOTOR_IN1_GPIO: i32 = 12;
/// Direction line 2.  HIGH with line 1 LOW = head out.
pub const LIMB_MOTOR_IN2_GPIO: i32 = 14;
/// PWM enable line (held at full duty).
pub const LIMB_MOTOR_PWM_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Mouth motor
// ---------------------------------------------------------------------------

/// Direction line 1.  HIGH with line 2 LOW = mouth driven closed.
pub const MOUTH_MOTOR_IN1_GPIO: i32 = 27;
/// Direction line 2.  HIGH with line 1 LOW = mouth open.
pub const MOUTH_MOTOR_IN2_GPIO: i32 = 26;
/// PWM enable line (held at full duty).
pub const MOUTH_MOTOR_PWM_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for both motor enable lines.
pub const MOTOR_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// MP3 module UART (UART2)
// ---------------------------------------------------------------------------

pub const MP3_UART_TX_GPIO: i32 = 17;
pub const MP3_UART_RX_GPIO: i32 = 16;
/// Fixed by the MP3 module firmware.
pub const MP3_BAUD_RATE: u32 = 9_600;
