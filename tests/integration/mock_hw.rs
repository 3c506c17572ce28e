//! Mock platform for integration tests.
//!
//! A fault-injecting [`Platform`] whose bus, panels and lines all write into
//! one shared [`MockRig`], so tests can drive raw input levels and assert on
//! what reached the "hardware" without touching real GPIO or I2C.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use rigio::app::ports::{DigitalInput, DigitalOutput, DisplayBus, DisplayDevice, Platform, Pull};
use rigio::error::{HalError, Result};
use rigio::hal::frame::Frame;

// ── Fault plan ────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// `open_bus` fails.
    pub bus: bool,
    /// Panels at these addresses do not answer.
    pub displays: HashSet<u8>,
    /// Claiming these pins fails.
    pub pins: HashSet<u8>,
    /// Every input read fails.
    pub read: bool,
    /// Every `show` fails.
    pub flush: bool,
    /// `show` fails on panels at these addresses.
    pub flush_at: HashSet<u8>,
    /// Reading back a driven output fails.
    pub readback: bool,
    /// Bus and chip release fail.
    pub release: bool,
}

// ── Shared rig state ──────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockRig {
    pub faults: Faults,
    /// Raw input levels.  Unset pins float high (pull-up idle).
    pub levels: HashMap<u8, bool>,
    /// Raw output levels as last driven.
    pub outputs: HashMap<u8, bool>,
    /// Pins currently held by a live line handle.
    pub claimed: HashSet<u8>,
    /// Last frame flushed to each panel address.
    pub shown: HashMap<u8, Frame>,
    pub show_count: HashMap<u8, u32>,
    pub bus_open: bool,
    pub bus_releases: u32,
    pub chip_releases: u32,
}

pub type SharedRig = Rc<RefCell<MockRig>>;

impl MockRig {
    pub fn with_faults(faults: Faults) -> SharedRig {
        Rc::new(RefCell::new(Self { faults, ..Self::default() }))
    }

    /// Pull `pin` to `high`.
    pub fn drive(rig: &SharedRig, pin: u8, high: bool) {
        rig.borrow_mut().levels.insert(pin, high);
    }

    pub fn shows(&self, address: u8) -> u32 {
        self.show_count.get(&address).copied().unwrap_or(0)
    }
}

// ── Platform ──────────────────────────────────────────────────

pub struct MockPlatform {
    rig: SharedRig,
}

impl MockPlatform {
    pub fn new(rig: &SharedRig) -> Self {
        Self { rig: Rc::clone(rig) }
    }

    /// Boxed, ready for `RigIo::new`.
    pub fn boxed(rig: &SharedRig) -> Option<Box<dyn Platform>> {
        Some(Box::new(Self::new(rig)))
    }

    fn claim(&mut self, pin: u8) -> Result<()> {
        let mut rig = self.rig.borrow_mut();
        if rig.faults.pins.contains(&pin) {
            return Err(HalError::Backend(format!("GPIO{pin} busy")));
        }
        if !rig.claimed.insert(pin) {
            return Err(HalError::Backend(format!("GPIO{pin} already claimed")));
        }
        Ok(())
    }
}

impl Platform for MockPlatform {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn open_bus(&mut self, bus: u8) -> Result<Box<dyn DisplayBus>> {
        let mut rig = self.rig.borrow_mut();
        if rig.faults.bus {
            return Err(HalError::Backend(format!("/dev/i2c-{bus}: no such device")));
        }
        rig.bus_open = true;
        Ok(Box::new(MockBus { rig: Rc::clone(&self.rig) }))
    }

    fn claim_input(&mut self, pin: u8, pull: Pull) -> Result<Box<dyn DigitalInput>> {
        assert_eq!(pull, Pull::Up, "rig inputs are wired pull-up");
        self.claim(pin)?;
        Ok(Box::new(MockInput { pin, rig: Rc::clone(&self.rig) }))
    }

    fn claim_output(&mut self, pin: u8) -> Result<Box<dyn DigitalOutput>> {
        self.claim(pin)?;
        self.rig.borrow_mut().outputs.insert(pin, false);
        Ok(Box::new(MockOutput { pin, rig: Rc::clone(&self.rig) }))
    }

    fn release(&mut self) -> Result<()> {
        let mut rig = self.rig.borrow_mut();
        rig.chip_releases += 1;
        if rig.faults.release {
            return Err(HalError::Backend("chip close failed".into()));
        }
        Ok(())
    }
}

// ── Bus and panels ────────────────────────────────────────────

struct MockBus {
    rig: SharedRig,
}

impl DisplayBus for MockBus {
    fn open_display(
        &mut self,
        address: u8,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn DisplayDevice>> {
        if self.rig.borrow().faults.displays.contains(&address) {
            return Err(HalError::Backend(format!("0x{address:02X}: NACK")));
        }
        Ok(Box::new(MockDisplay {
            address,
            staged: Frame::new(width, height),
            rig: Rc::clone(&self.rig),
        }))
    }

    fn release(&mut self) -> Result<()> {
        let mut rig = self.rig.borrow_mut();
        rig.bus_open = false;
        rig.bus_releases += 1;
        if rig.faults.release {
            return Err(HalError::Backend("bus close failed".into()));
        }
        Ok(())
    }
}

struct MockDisplay {
    address: u8,
    staged: Frame,
    rig: SharedRig,
}

impl DisplayDevice for MockDisplay {
    fn fill(&mut self, on: bool) {
        self.staged.fill(on);
    }

    fn set_image(&mut self, frame: &Frame) -> Result<()> {
        if frame.dimensions() != self.staged.dimensions() {
            return Err(HalError::Backend("image size mismatch".into()));
        }
        self.staged.copy_from(frame);
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let mut rig = self.rig.borrow_mut();
        if rig.faults.flush || rig.faults.flush_at.contains(&self.address) {
            return Err(HalError::Backend(format!("0x{:02X}: write failed", self.address)));
        }
        rig.shown.insert(self.address, self.staged.clone());
        *rig.show_count.entry(self.address).or_insert(0) += 1;
        Ok(())
    }
}

// ── Lines ─────────────────────────────────────────────────────

struct MockInput {
    pin: u8,
    rig: SharedRig,
}

impl DigitalInput for MockInput {
    fn is_high(&mut self) -> Result<bool> {
        let rig = self.rig.borrow();
        if rig.faults.read {
            return Err(HalError::Backend(format!("GPIO{} read failed", self.pin)));
        }
        Ok(rig.levels.get(&self.pin).copied().unwrap_or(true))
    }
}

impl Drop for MockInput {
    fn drop(&mut self) {
        self.rig.borrow_mut().claimed.remove(&self.pin);
    }
}

struct MockOutput {
    pin: u8,
    rig: SharedRig,
}

impl DigitalOutput for MockOutput {
    fn set_level(&mut self, high: bool) -> Result<()> {
        self.rig.borrow_mut().outputs.insert(self.pin, high);
        Ok(())
    }

    fn is_set_high(&mut self) -> Result<bool> {
        let rig = self.rig.borrow();
        if rig.faults.readback {
            return Err(HalError::Backend(format!("GPIO{} read-back failed", self.pin)));
        }
        Ok(rig.outputs.get(&self.pin).copied().unwrap_or(false))
    }
}

impl Drop for MockOutput {
    fn drop(&mut self) {
        self.rig.borrow_mut().claimed.remove(&self.pin);
    }
}
