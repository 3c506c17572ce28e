//! Rig configuration parameters
//!
//! Wiring, display geometry and polling cadence for one rig.  Defaults match
//! the harness in [`pins`](crate::pins); a JSON file can override any field.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Core rig configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    // --- I2C displays ---
    /// Linux I2C bus number (`/dev/i2c-N`)
    pub i2c_bus: u8,
    /// Panel width in pixels
    pub display_width: u32,
    /// Panel height in pixels (multiple of 8)
    pub display_height: u32,
    pub left_display_address: u8,
    pub right_display_address: u8,

    // --- Inputs (pull-up, active low) ---
    pub right_lever_pin: u8,
    pub left_lever_pin: u8,
    pub nose_poke_pin: u8,

    // --- Output ---
    /// Water-port solenoid line; `None` on display-only rigs
    pub water_port_pin: Option<u8>,
    /// Drive LOW to energise (relay boards with inverting inputs)
    pub water_port_active_low: bool,

    // --- Timing ---
    /// Status poll interval (milliseconds)
    pub poll_interval_ms: u32,

    /// Skip the hardware probe entirely
    pub force_simulation: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            i2c_bus: pins::I2C_BUS,
            display_width: pins::DISPLAY_WIDTH,
            display_height: pins::DISPLAY_HEIGHT,
            left_display_address: pins::LEFT_DISPLAY_ADDR,
            right_display_address: pins::RIGHT_DISPLAY_ADDR,

            right_lever_pin: pins::RIGHT_LEVER_GPIO,
            left_lever_pin: pins::LEFT_LEVER_GPIO,
            nose_poke_pin: pins::NOSE_POKE_GPIO,

            water_port_pin: Some(pins::WATER_PORT_GPIO),
            water_port_active_low: false,

            poll_interval_ms: pins::POLL_INTERVAL_MS, // 100 Hz
            force_simulation: false,
        }
    }
}

impl RigConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(10..=1000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 10–1000",
            ));
        }
        if !(1..=128).contains(&self.display_width) {
            return Err(ConfigError::ValidationFailed(
                "display_width must be 1–128",
            ));
        }
        if !(8..=64).contains(&self.display_height) || self.display_height % 8 != 0 {
            return Err(ConfigError::ValidationFailed(
                "display_height must be a multiple of 8 in 8–64",
            ));
        }
        for addr in [self.left_display_address, self.right_display_address] {
            if !(0x03..=0x77).contains(&addr) {
                return Err(ConfigError::ValidationFailed(
                    "display address must be a 7-bit I2C address (0x03–0x77)",
                ));
            }
        }
        if self.left_display_address == self.right_display_address {
            return Err(ConfigError::ValidationFailed(
                "left and right displays share an address",
            ));
        }

        let lines = self.line_pins();
        if lines.iter().any(|&p| p > pins::MAX_HEADER_GPIO) {
            return Err(ConfigError::ValidationFailed(
                "GPIO pins must be 0–27",
            ));
        }
        for (i, a) in lines.iter().enumerate() {
            if lines[i + 1..].contains(a) {
                return Err(ConfigError::ValidationFailed(
                    "GPIO pin assigned to more than one line",
                ));
            }
        }
        Ok(())
    }

    /// Every GPIO the rig claims, inputs first.
    pub fn line_pins(&self) -> Vec<u8> {
        let mut v = vec![self.right_lever_pin, self.left_lever_pin, self.nose_poke_pin];
        v.extend(self.water_port_pin);
        v
    }
}
