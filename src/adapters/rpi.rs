//! Raspberry Pi platform (rppal).
//!
//! GPIO goes through `/dev/gpiomem`, I2C through `/dev/i2c-N`.  Both are
//! opened lazily: `RpiPlatform::new` never touches hardware, so a missing
//! device shows up as a per-stage failure inside `RigIo::new`.
//!
//! rppal resets each pin to its previous mode when the pin handle drops.

use rppal::gpio::Gpio;
use rppal::i2c::I2c;

use super::hardware::{EhDisplayBus, EhInput, EhOutput};
use crate::app::ports::{DigitalInput, DigitalOutput, DisplayBus, Platform, Pull};
use crate::error::{HalError, Result};

pub struct RpiPlatform {
    gpio: Option<Gpio>,
}

impl RpiPlatform {
    pub fn new() -> Self {
        Self { gpio: None }
    }

    fn gpio(&mut self) -> Result<&Gpio> {
        if self.gpio.is_none() {
            self.gpio = Some(Gpio::new().map_err(HalError::backend)?);
        }
        self.gpio
            .as_ref()
            .ok_or_else(|| HalError::Backend("GPIO chip not open".into()))
    }
}

impl Default for RpiPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for RpiPlatform {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn open_bus(&mut self, bus: u8) -> Result<Box<dyn DisplayBus>> {
        let i2c = I2c::with_bus(bus).map_err(HalError::backend)?;
        Ok(Box::new(EhDisplayBus::new(i2c)))
    }

    fn claim_input(&mut self, pin: u8, pull: Pull) -> Result<Box<dyn DigitalInput>> {
        let pin = self.gpio()?.get(pin).map_err(HalError::backend)?;
        let input = match pull {
            Pull::Up => pin.into_input_pullup(),
            Pull::Down => pin.into_input_pulldown(),
            Pull::None => pin.into_input(),
        };
        Ok(Box::new(EhInput::new(input)))
    }

    fn claim_output(&mut self, pin: u8) -> Result<Box<dyn DigitalOutput>> {
        let pin = self.gpio()?.get(pin).map_err(HalError::backend)?;
        Ok(Box::new(EhOutput::new(pin.into_output_low())))
    }

    fn release(&mut self) -> Result<()> {
        self.gpio = None;
        Ok(())
    }
}
