//! Hardware adapter — bridges embedded-hal peripherals to the backend port traits.
//!
//! Any GPIO library that implements embedded-hal 1.0 `InputPin` /
//! `StatefulOutputPin` / `I2c` plugs into the rig through these wrappers, so
//! a [`Platform`](crate::app::ports::Platform) implementation is reduced to
//! "open the chip, hand out pins".

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{InputPin, StatefulOutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RcDevice;

use crate::app::ports::{DigitalInput, DigitalOutput, DisplayBus, DisplayDevice};
use crate::drivers::ssd1306::Ssd1306;
use crate::error::{HalError, Result};
use crate::hal::frame::Frame;

// ── GPIO ──────────────────────────────────────────────────────

pub struct EhInput<P>(P);

impl<P: InputPin> EhInput<P> {
    pub fn new(pin: P) -> Self {
        Self(pin)
    }
}

impl<P: InputPin> DigitalInput for EhInput<P> {
    fn is_high(&mut self) -> Result<bool> {
        self.0.is_high().map_err(HalError::backend)
    }
}

pub struct EhOutput<P>(P);

impl<P: StatefulOutputPin> EhOutput<P> {
    pub fn new(pin: P) -> Self {
        Self(pin)
    }
}

impl<P: StatefulOutputPin> DigitalOutput for EhOutput<P> {
    fn set_level(&mut self, high: bool) -> Result<()> {
        let r = if high { self.0.set_high() } else { self.0.set_low() };
        r.map_err(HalError::backend)
    }

    fn is_set_high(&mut self) -> Result<bool> {
        self.0.is_set_high().map_err(HalError::backend)
    }
}

// ── I2C displays ──────────────────────────────────────────────

/// An opened I2C bus shared by every panel on it.
///
/// Each panel gets its own [`RcDevice`] onto the bus.  `Rc` keeps the bus
/// `!Send`: it belongs to the polling thread that opened it.
pub struct EhDisplayBus<I> {
    bus: Option<Rc<RefCell<I>>>,
}

impl<I: I2c> EhDisplayBus<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            bus: Some(Rc::new(RefCell::new(i2c))),
        }
    }
}

impl<I: I2c + 'static> DisplayBus for EhDisplayBus<I> {
    fn open_display(
        &mut self,
        address: u8,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn DisplayDevice>> {
        let bus = self
            .bus
            .as_ref()
            .ok_or_else(|| HalError::Backend("bus already released".into()))?;
        let mut panel = Ssd1306::new(RcDevice::new(Rc::clone(bus)), address, width, height);
        panel.init().map_err(HalError::backend)?;
        Ok(Box::new(panel))
    }

    fn release(&mut self) -> Result<()> {
        match self.bus.take() {
            // The fd closes when the last handle drops.
            Some(bus) if Rc::strong_count(&bus) > 1 => Err(HalError::Release(format!(
                "{} panel handle(s) still hold the bus",
                Rc::strong_count(&bus) - 1
            ))),
            _ => Ok(()),
        }
    }
}

impl<I: I2c> DisplayDevice for Ssd1306<I> {
    fn fill(&mut self, on: bool) {
        Ssd1306::fill(self, on);
    }

    fn set_image(&mut self, frame: &Frame) -> Result<()> {
        Ssd1306::set_image(self, frame).map_err(HalError::backend)
    }

    fn show(&mut self) -> Result<()> {
        Ssd1306::show(self).map_err(HalError::backend)
    }
}
