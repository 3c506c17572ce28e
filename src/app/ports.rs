//! Port traits — the hexagonal boundary between the rig logic and the outside world.
//!
//! ```text
//!   Platform adapter ──▶ backend ports ──▶ RigIo (HAL) ──▶ SensorPort / ActuatorPort ──▶ MonitorService
//! ```
//!
//! Two layers of ports live here:
//!
//! - **Backend ports** (`Platform`, `DisplayBus`, `DisplayDevice`,
//!   `DigitalInput`, `DigitalOutput`) are the capability set a physical
//!   binding must provide.  Swapping GPIO libraries means writing one more
//!   `Platform`; nothing above it changes.
//! - **Rig ports** (`SensorPort`, `ActuatorPort`) are what the HAL offers to
//!   polling clients.  [`RigIo`](crate::hal::RigIo) implements both.

use crate::config::RigConfig;
use crate::error::Result;
use crate::hal::frame::Frame;
use crate::hal::state::{InputState, Output, Side};

// ───────────────────────────────────────────────────────────────
// Backend ports (driven adapter: HAL → hardware)
// ───────────────────────────────────────────────────────────────

/// Input bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
    None,
}

/// One physical binding (GPIO chip + I2C controller).
pub trait Platform {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Open the I2C bus the displays hang off.
    fn open_bus(&mut self, bus: u8) -> Result<Box<dyn DisplayBus>>;

    /// Claim a GPIO as input with the given bias.
    fn claim_input(&mut self, pin: u8, pull: Pull) -> Result<Box<dyn DigitalInput>>;

    /// Claim a GPIO as output, driven low.
    fn claim_output(&mut self, pin: u8) -> Result<Box<dyn DigitalOutput>>;

    /// Close the chip handle.  Called once, on HAL drop.
    fn release(&mut self) -> Result<()>;
}

/// An opened I2C bus.
pub trait DisplayBus {
    /// Initialise the panel at `address`.  Fails if it does not answer.
    fn open_display(&mut self, address: u8, width: u32, height: u32)
    -> Result<Box<dyn DisplayDevice>>;

    /// Close the bus handle.  Called once, on HAL drop.
    fn release(&mut self) -> Result<()>;
}

/// A monochrome panel: stage a frame, then flush it.
pub trait DisplayDevice {
    fn fill(&mut self, on: bool);

    fn set_image(&mut self, frame: &Frame) -> Result<()>;

    fn show(&mut self) -> Result<()>;
}

pub trait DigitalInput {
    /// Raw electrical level.
    fn is_high(&mut self) -> Result<bool>;
}

pub trait DigitalOutput {
    fn set_level(&mut self, high: bool) -> Result<()>;

    /// Level last driven onto the pin, read back from the chip.
    fn is_set_high(&mut self) -> Result<bool>;
}

// ───────────────────────────────────────────────────────────────
// Rig ports (HAL → polling clients)
// ───────────────────────────────────────────────────────────────

/// Read side of the rig.
pub trait SensorPort {
    /// Fresh snapshot of every monitored line.  Never cached.
    fn read_inputs(&mut self) -> Result<InputState>;
}

/// Write side of the rig.
pub trait ActuatorPort {
    /// Energise (`true`) or release an output line.
    fn set_output(&mut self, output: Output, active: bool) -> Result<()>;

    /// Blank both panels.
    fn clear_displays(&mut self) -> Result<()>;

    /// Replace one panel's contents.
    fn render(&mut self, side: Side, frame: &Frame) -> Result<()>;

    /// Panel geometry `(width, height)`.
    fn display_size(&self) -> (u32, u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: client → logging)
// ───────────────────────────────────────────────────────────────

/// The status client emits [`RigEvent`](super::events::RigEvent)s through
/// this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RigEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads rig configuration.
///
/// Implementations MUST run [`RigConfig::validate`] before returning.
pub trait ConfigPort {
    fn load(&self) -> core::result::Result<RigConfig, ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found (first run).
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted(String),
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError(String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
