//! Blocking delay adapter.
//!
//! Every wait in the firmware goes through [`LightSleepDelay`].
//!
//! - **`target_os = "espidf"`**: arms the RTC timer and enters light
//!   sleep, so the CPU draws almost nothing between motor moves.  Wake-up
//!   latency is well under a millisecond, so the delay is treated as exact.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep`, for host-side
//!   simulation.

use embedded_hal::delay::DelayNs;

/// Light-sleep backed implementation of [`DelayNs`].
#[derive(Debug, Default)]
pub struct LightSleepDelay {
    slept_us: u64,
}

impl LightSleepDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time requested since construction, in microseconds.
    pub fn total_slept_us(&self) -> u64 {
        self.slept_us
    }

    #[cfg(target_os = "espidf")]
    fn sleep_us(&mut self, us: u64) {
        if us == 0 {
            return;
        }
        // SAFETY: plain FFI calls with no pointers; the timer wake-up
        // source is re-armed before every sleep.
        unsafe {
            esp_idf_svc::sys::esp_sleep_enable_timer_wakeup(us);
            esp_idf_svc::sys::esp_light_sleep_start();
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_us(&mut self, us: u64) {
        std::thread::sleep(std::time::Duration::from_micros(us));
    }
}

impl DelayNs for LightSleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        let us = u64::from(ns.div_ceil(1_000));
        self.slept_us += us;
        self.sleep_us(us);
    }

    fn delay_us(&mut self, us: u32) {
        self.slept_us += u64::from(us);
        self.sleep_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        let us = u64::from(ms) * 1_000;
        self.slept_us += us;
        self.sleep_us(us);
    }
}
