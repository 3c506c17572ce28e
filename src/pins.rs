//! Default pin and bus assignments for the rig harness.
//!
//! Single source of truth for the factory wiring; every field of
//! [`RigConfig`](crate::config::RigConfig) defaults from here.  BCM numbering.

// ---------------------------------------------------------------------------
// Operant inputs (momentary switches / IR break-beam, wired to ground)
// ---------------------------------------------------------------------------

/// Right lever micro-switch.  LOW = pressed (internal pull-up).
pub const RIGHT_LEVER_GPIO: u8 = 23;
/// Left lever micro-switch.  LOW = pressed (internal pull-up).
pub const LEFT_LEVER_GPIO: u8 = 24;
/// Nose-poke IR break-beam receiver.  LOW = beam broken.
pub const NOSE_POKE_GPIO: u8 = 17;

// ---------------------------------------------------------------------------
// Water delivery
// ---------------------------------------------------------------------------

/// Solenoid driver enable for the water port.  HIGH = energised.
pub const WATER_PORT_GPIO: u8 = 27;

/// Highest GPIO exposed on the 40-pin header.
pub const MAX_HEADER_GPIO: u8 = 27;

// ---------------------------------------------------------------------------
// I²C status displays (SSD1306, 128x64)
// ---------------------------------------------------------------------------

/// `/dev/i2c-1` on the 40-pin header (SDA = GPIO 2, SCL = GPIO 3).
pub const I2C_BUS: u8 = 1;
/// Left panel, SA0 tied low.
pub const LEFT_DISPLAY_ADDR: u8 = 0x3C;
/// Right panel, SA0 tied high.
pub const RIGHT_DISPLAY_ADDR: u8 = 0x3D;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

/// Default poll period (100 Hz).
pub const POLL_INTERVAL_MS: u32 = 10;
