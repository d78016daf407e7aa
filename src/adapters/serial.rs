//! UART adapter for the MP3 module link.
//!
//! Implements [`SerialPort`].
//!
//! - **`target_os = "espidf"`**: writes through an esp-idf-hal
//!   [`UartDriver`](esp_idf_svc::hal::uart::UartDriver) configured for
//!   9600 8N1.
//! - **`not(target_os = "espidf")`**: appends to an in-memory buffer so
//!   host builds can inspect what would have gone over the wire.

use log::warn;

use crate::app::ports::SerialPort;
use crate::error::SerialError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::UartDriver;

pub struct UartSerial {
    #[cfg(target_os = "espidf")]
    uart: UartDriver<'static>,
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<u8>,
}

impl UartSerial {
    #[cfg(target_os = "espidf")]
    pub fn new(uart: UartDriver<'static>) -> Self {
        Self { uart }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self { sent: Vec::new() }
    }

    /// Everything written so far (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for UartSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for UartSerial {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        #[cfg(target_os = "espidf")]
        {
            let written = self.uart.write(bytes).map_err(|e| {
                warn!("UART write failed: {}", e);
                SerialError::WriteFailed
            })?;
            if written < bytes.len() {
                warn!("UART short write: {}/{} bytes", written, bytes.len());
                return Err(SerialError::ShortWrite { written });
            }
            Ok(())
        }

        #[cfg(not(target_os = "espidf"))]
        {
            if bytes.is_empty() {
                warn!("empty UART write");
            }
            self.sent.extend_from_slice(bytes);
            Ok(())
        }
    }
}
