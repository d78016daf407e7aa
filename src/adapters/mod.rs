//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                   |
//! |------------|---------------|-------------------------------|
//! | `hardware` | ActuatorPort  | Two H-bridges (GPIO + LEDC)   |
//! |            | InputPort     | Button GPIO, LDR on ADC1      |
//! | `log_sink` | EventSink     | Serial log output             |
//! | `serial`   | SerialPort    | UART2 to the MP3 module       |
//! | `time`     | DelayNs       | RTC timer light sleep         |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
