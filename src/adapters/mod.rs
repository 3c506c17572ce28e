//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements            | Connects to                  |
//! |---------------|-----------------------|------------------------------|
//! | `config_file` | ConfigPort            | JSON file on disk            |
//! | `hardware`    | DigitalInput/Output   | any embedded-hal 1.0 pin     |
//! |               | DisplayBus            | any embedded-hal 1.0 I2C bus |
//! | `log_sink`    | EventSink             | `log` / `env_logger`         |
//! | `rpi`         | Platform              | rppal (`rpi` feature)        |

use crate::app::ports::Platform;
use crate::probe::Capabilities;

pub mod config_file;
pub mod hardware;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;

/// Physical binding for this build, if the probe says it is worth trying.
#[cfg(feature = "rpi")]
pub fn detect_platform(caps: &Capabilities) -> Option<Box<dyn Platform>> {
    if caps.physical() {
        Some(Box::new(rpi::RpiPlatform::new()))
    } else {
        None
    }
}

/// No physical binding compiled in.
#[cfg(not(feature = "rpi"))]
pub fn detect_platform(_caps: &Capabilities) -> Option<Box<dyn Platform>> {
    None
}
