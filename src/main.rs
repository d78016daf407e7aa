//! Bigmouth firmware main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  MotorPair        PanelInputs     UartSerial   LightSleepDelay│
//! │  (ActuatorPort)   (InputPort)     (SerialPort) (DelayNs)     │
//! │  LogEventSink (EventSink)                                    │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │            AppService (pure logic)                   │    │
//! │  │  Trigger · Catalogue · Choreography · MP3 protocol   │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::adc::attenuation::DB_11;
use esp_idf_svc::hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::uart::{UartDriver, config::Config as UartConfig};
use log::{info, warn};

use bigmouth::adapters::hardware::{MotorPair, PanelInputs};
use bigmouth::adapters::log_sink::LogEventSink;
use bigmouth::adapters::serial::UartSerial;
use bigmouth::adapters::time::LightSleepDelay;
use bigmouth::app::service::AppService;
use bigmouth::choreography::Catalogue;
use bigmouth::config::SystemConfig;
use bigmouth::drivers::light_sensor::LightSensor;
use bigmouth::drivers::motor::{HBridge, enable_full_duty};
use bigmouth::pins;

// The typed peripherals taken below (`p.pins.gpioN`) must match the table
// in `pins`.  Moving a pin there without moving it here fails the build.
const _: () = {
    assert!(pins::LIMB_MOTOR_IN1_GPIO == 12);
    assert!(pins::LIMB_MOTOR_IN2_GPIO == 14);
    assert!(pins::LIMB_MOTOR_PWM_GPIO == 13);
    assert!(pins::MOUTH_MOTOR_IN1_GPIO == 27);
    assert!(pins::MOUTH_MOTOR_IN2_GPIO == 26);
    assert!(pins::MOUTH_MOTOR_PWM_GPIO == 25);
    assert!(pins::BUTTON_GPIO == 4);
    assert!(pins::LDR_GPIO == 33);
    assert!(pins::LDR_ADC_CHANNEL == 5);
    assert!(pins::MP3_UART_TX_GPIO == 17);
    assert!(pins::MP3_UART_RX_GPIO == 16);
};

fn pwm_resolution(bits: u32) -> Result<Resolution> {
    Ok(match bits {
        8 => Resolution::Bits8,
        10 => Resolution::Bits10,
        12 => Resolution::Bits12,
        other => anyhow::bail!("unsupported LEDC resolution: {} bits", other),
    })
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Bigmouth v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    let p = Peripherals::take()?;

    info!(
        "pins: limb in1={} in2={} pwm={} | mouth in1={} in2={} pwm={}",
        pins::LIMB_MOTOR_IN1_GPIO,
        pins::LIMB_MOTOR_IN2_GPIO,
        pins::LIMB_MOTOR_PWM_GPIO,
        pins::MOUTH_MOTOR_IN1_GPIO,
        pins::MOUTH_MOTOR_IN2_GPIO,
        pins::MOUTH_MOTOR_PWM_GPIO,
    );
    info!(
        "pins: button={} ldr={} (adc1 ch{}) | mp3 tx={} rx={}",
        pins::BUTTON_GPIO,
        pins::LDR_GPIO,
        pins::LDR_ADC_CHANNEL,
        pins::MP3_UART_TX_GPIO,
        pins::MP3_UART_RX_GPIO,
    );

    // ── 2. Motors: direction lines + enable held at full duty ──
    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::new()
            .frequency(pins::MOTOR_PWM_FREQ_HZ.Hz().into())
            .resolution(pwm_resolution(pins::PWM_RESOLUTION_BITS)?),
    )?;
    let mut limb_enable = LedcDriver::new(p.ledc.channel0, &timer, p.pins.gpio13)?;
    let mut mouth_enable = LedcDriver::new(p.ledc.channel1, &timer, p.pins.gpio25)?;
    enable_full_duty("limb", &mut limb_enable);
    enable_full_duty("mouth", &mut mouth_enable);

    let limb = HBridge::new(
        "limb",
        PinDriver::output(p.pins.gpio12)?,
        PinDriver::output(p.pins.gpio14)?,
    );
    let mouth = HBridge::new(
        "mouth",
        PinDriver::output(p.pins.gpio27)?,
        PinDriver::output(p.pins.gpio26)?,
    );
    let actuators = MotorPair::new(limb, mouth);

    // ── 3. Inputs: active-low button, LDR on ADC1 ─────────────
    let mut button = PinDriver::input(p.pins.gpio4)?;
    button.set_pull(Pull::Up)?;

    let adc = AdcDriver::new(p.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut ldr = AdcChannelDriver::new(&adc, p.pins.gpio33, &adc_config)?;
    let read_ldr = move || {
        ldr.read().unwrap_or_else(|e| {
            warn!("LDR read failed: {}", e);
            0
        })
    };
    let input = PanelInputs::new(button, LightSensor::new(read_ldr, config.light_full_scale_raw));

    // ── 4. MP3 module on UART2, 9600 8N1 ──────────────────────
    let uart = UartDriver::new(
        p.uart2,
        p.pins.gpio17,
        p.pins.gpio16,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(pins::MP3_BAUD_RATE)),
    )?;
    let serial = UartSerial::new(uart);

    // ── 5. Boot and run ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::boot(
        config,
        Catalogue::authored(),
        actuators,
        input,
        serial,
        LightSleepDelay::new(),
        &mut sink,
    )?;

    info!(
        "Entering control loop: mode={:?}, track={}",
        app.mode(),
        app.current_track()
    );

    loop {
        app.tick(&mut sink);
    }
}
