//! Rig hardware abstraction layer.
//!
//! [`RigIo`] is the only owner of physical rig resources.  It is built once
//! per process and never fails to build: every resource is tried
//! independently and falls back to simulation when the physical side does
//! not come up.
//!
//! ## Construction stages
//!
//! | Stage | Resource          | On failure                                   |
//! |-------|-------------------|----------------------------------------------|
//! | 1     | I2C bus           | both displays simulated, no panel is probed  |
//! | 2     | each display      | that display simulated, the other unaffected |
//! | 3     | GPIO line group   | every input and the output simulated         |
//!
//! A configuration that fails [`RigConfig::validate`] opens no hardware: every
//! resource starts simulated.
//!
//! A stage failing never skips a later stage.  The choice is recorded per
//! resource in [`BackendReport`] and never revisited: no retry, no reconnect.
//!
//! After construction, physical read/write/flush errors propagate to the
//! caller.  Releasing handles on drop is best-effort and silent.

pub mod frame;
pub mod state;

use log::{debug, info, warn};

use crate::app::ports::{
    ActuatorPort, DigitalInput, DigitalOutput, DisplayBus, DisplayDevice, Platform, Pull,
    SensorPort,
};
use crate::config::RigConfig;
use crate::error::{HalError, Result};
use crate::probe::Capabilities;

use frame::Frame;
use state::{Backend, BackendReport, Input, InputState, Output, Side};

// ───────────────────────────────────────────────────────────────
// Per-resource backends
// ───────────────────────────────────────────────────────────────

enum DisplaySink {
    Physical(Box<dyn DisplayDevice>),
    /// Accepts every frame and discards it.
    Simulated,
}

struct DisplaySlot {
    side: Side,
    /// Last frame handed to the panel (kept for both backends).
    frame: Frame,
    sink: DisplaySink,
}

impl DisplaySlot {
    fn simulated(side: Side, width: u32, height: u32) -> Self {
        Self {
            side,
            frame: Frame::new(width, height),
            sink: DisplaySink::Simulated,
        }
    }

    /// Stage 2: probe one panel.  `bus` is `None` when stage 1 failed.
    fn open(
        bus: Option<&mut Box<dyn DisplayBus>>,
        side: Side,
        address: u8,
        width: u32,
        height: u32,
    ) -> Self {
        let mut slot = Self::simulated(side, width, height);
        let Some(bus) = bus else {
            return slot;
        };

        match bus.open_display(address, width, height) {
            Ok(device) => {
                info!("rig: {} display up at 0x{:02X}", side, address);
                slot.sink = DisplaySink::Physical(device);
            }
            Err(e) => {
                let e = HalError::DisplayInit { side, address, detail: e.detail() };
                warn!("rig: {}; {} display simulated", e, side);
            }
        }
        slot
    }

    fn backend(&self) -> Backend {
        match self.sink {
            DisplaySink::Physical(_) => Backend::Physical,
            DisplaySink::Simulated => Backend::Simulated,
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.frame.fill(false);
        if let DisplaySink::Physical(device) = &mut self.sink {
            device.fill(false);
            device
                .show()
                .map_err(|e| HalError::Display { side: self.side, detail: e.detail() })?;
        }
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        if frame.dimensions() != self.frame.dimensions() {
            return Err(HalError::FrameSize {
                expected: self.frame.dimensions(),
                actual: frame.dimensions(),
            });
        }
        self.frame.copy_from(frame);
        if let DisplaySink::Physical(device) = &mut self.sink {
            let side = self.side;
            let wrap = |e: HalError| HalError::Display { side, detail: e.detail() };
            device.set_image(&self.frame).map_err(wrap)?;
            device.show().map_err(wrap)?;
        }
        Ok(())
    }
}

/// Inputs and the output line, degraded as one group.
enum LineBank {
    Physical {
        inputs: Vec<(Input, Box<dyn DigitalInput>)>,
        water_port: Option<Box<dyn DigitalOutput>>,
        active_low: bool,
    },
    /// In-memory state; `water_port` is `Some` only if the rig wires one.
    Simulated(InputState),
}

impl LineBank {
    fn simulated(config: &RigConfig) -> Self {
        Self::Simulated(InputState {
            water_port: config.water_port_pin.map(|_| false),
            ..InputState::default()
        })
    }

    /// Stage 3: all lines or none.
    fn claim(platform: &mut dyn Platform, config: &RigConfig) -> Self {
        match Self::try_claim(platform, config) {
            Ok(bank) => {
                info!("rig: GPIO lines claimed ({:?})", config.line_pins());
                bank
            }
            Err(e) => {
                // Lines claimed before the failure drop here and are released.
                warn!("rig: {}; all lines simulated", e);
                Self::simulated(config)
            }
        }
    }

    fn try_claim(platform: &mut dyn Platform, config: &RigConfig) -> Result<Self> {
        let wiring = [
            (Input::RightLever, config.right_lever_pin),
            (Input::LeftLever, config.left_lever_pin),
            (Input::NosePoke, config.nose_poke_pin),
        ];
        let claim_err = |pin: u8| move |e: HalError| HalError::PinClaim { pin, detail: e.detail() };

        let mut inputs = Vec::with_capacity(wiring.len());
        for (input, pin) in wiring {
            let line = platform.claim_input(pin, Pull::Up).map_err(claim_err(pin))?;
            inputs.push((input, line));
        }

        let active_low = config.water_port_active_low;
        let water_port = match config.water_port_pin {
            Some(pin) => {
                let mut line = platform.claim_output(pin).map_err(claim_err(pin))?;
                // Idle level is "not energised" whatever the polarity.
                line.set_level(active_low).map_err(claim_err(pin))?;
                Some(line)
            }
            None => None,
        };

        Ok(Self::Physical { inputs, water_port, active_low })
    }

    fn backend(&self) -> Backend {
        match self {
            Self::Physical { .. } => Backend::Physical,
            Self::Simulated(_) => Backend::Simulated,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// RigIo
// ───────────────────────────────────────────────────────────────

/// The rig HAL.  One instance per process, owned by the polling loop.
pub struct RigIo {
    platform: Option<Box<dyn Platform>>,
    bus: Option<Box<dyn DisplayBus>>,
    left: DisplaySlot,
    right: DisplaySlot,
    lines: LineBank,
}

impl RigIo {
    /// Build from the process-wide probe result.
    pub fn open(config: &RigConfig, caps: &Capabilities) -> Self {
        let platform = if config.force_simulation {
            info!("rig: simulation forced by config");
            None
        } else {
            crate::adapters::detect_platform(caps)
        };
        Self::new(config, platform)
    }

    /// Fully simulated rig.
    pub fn simulated(config: &RigConfig) -> Self {
        Self::new(config, None)
    }

    /// Run the three construction stages against `platform`.
    ///
    /// `None` means no physical binding exists in this process: every
    /// resource is simulated and nothing is probed.
    pub fn new(config: &RigConfig, platform: Option<Box<dyn Platform>>) -> Self {
        let (width, height) = (config.display_width, config.display_height);

        let Some(mut platform) = platform else {
            info!("rig: no hardware backend, running in simulation mode");
            return Self::all_simulated(config);
        };
        if let Err(e) = config.validate() {
            warn!("rig: {}; config rejected, all resources simulated", e);
            return Self::all_simulated(config);
        }
        info!("rig: bringing up {} backend", platform.name());

        // 1. Shared I2C bus
        let mut bus = match platform.open_bus(config.i2c_bus) {
            Ok(bus) => Some(bus),
            Err(e) => {
                let e = HalError::BusInit { bus: config.i2c_bus, detail: e.detail() };
                warn!("rig: {}; both displays simulated", e);
                None
            }
        };

        // 2. Displays, each on its own
        let left = DisplaySlot::open(
            bus.as_mut(),
            Side::Left,
            config.left_display_address,
            width,
            height,
        );
        let right = DisplaySlot::open(
            bus.as_mut(),
            Side::Right,
            config.right_display_address,
            width,
            height,
        );

        // 3. GPIO lines, all or nothing
        let lines = LineBank::claim(&mut *platform, config);

        let io = Self {
            platform: Some(platform),
            bus,
            left,
            right,
            lines,
        };
        info!("rig: backends {:?}", io.backends());
        io
    }

    fn all_simulated(config: &RigConfig) -> Self {
        let (width, height) = (config.display_width, config.display_height);
        Self {
            platform: None,
            bus: None,
            left: DisplaySlot::simulated(Side::Left, width, height),
            right: DisplaySlot::simulated(Side::Right, width, height),
            lines: LineBank::simulated(config),
        }
    }

    /// Backend chosen for each resource.
    pub fn backends(&self) -> BackendReport {
        BackendReport {
            bus: if self.bus.is_some() { Backend::Physical } else { Backend::Simulated },
            left_display: self.left.backend(),
            right_display: self.right.backend(),
            lines: self.lines.backend(),
        }
    }

    /// Whether this rig wires `output`.
    pub fn has_output(&self, output: Output) -> bool {
        match (&self.lines, output) {
            (LineBank::Physical { water_port, .. }, Output::WaterPort) => water_port.is_some(),
            (LineBank::Simulated(state), _) => state.output(output).is_some(),
        }
    }

    /// Last frame handed to a panel.  Tracked for simulated panels too.
    pub fn frame(&self, side: Side) -> &Frame {
        &self.slot(side).frame
    }

    /// Drive a simulated input.  No effect on physical lines.
    ///
    /// Returns `false` when the line group is physical.
    pub fn simulate_input(&mut self, input: Input, active: bool) -> bool {
        match &mut self.lines {
            LineBank::Simulated(state) => {
                state.set(input, active);
                true
            }
            LineBank::Physical { .. } => false,
        }
    }

    /// Drop the HAL now, releasing hardware handles.
    pub fn shutdown(self) {
        info!("rig: shutting down");
    }

    fn slot(&self, side: Side) -> &DisplaySlot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut DisplaySlot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn release(&mut self) {
        // Panels and lines hold handles onto the bus / chip; drop them first.
        self.left.sink = DisplaySink::Simulated;
        self.right.sink = DisplaySink::Simulated;
        if matches!(self.lines, LineBank::Physical { .. }) {
            self.lines = LineBank::Simulated(InputState::default());
        }

        let bus = self.bus.take().map(|mut bus| bus.release());
        let chip = self.platform.take().map(|mut platform| platform.release());
        for result in [bus, chip].into_iter().flatten() {
            if let Err(e) = result {
                debug!("rig: ignoring {}", HalError::Release(e.detail()));
            }
        }
    }
}

impl Drop for RigIo {
    fn drop(&mut self) {
        self.release();
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for RigIo {
    fn read_inputs(&mut self) -> Result<InputState> {
        match &mut self.lines {
            LineBank::Simulated(state) => Ok(*state),
            LineBank::Physical { inputs, water_port, active_low } => {
                let mut state = InputState::default();
                for (input, line) in inputs.iter_mut() {
                    let high = line.is_high().map_err(|e| HalError::Read {
                        line: (*input).into(),
                        detail: e.detail(),
                    })?;
                    // Pull-up wiring: a closed switch pulls the line low.
                    state.set(*input, !high);
                }
                if let Some(line) = water_port {
                    let high = line.is_set_high().map_err(|e| HalError::Read {
                        line: Output::WaterPort.into(),
                        detail: e.detail(),
                    })?;
                    state.water_port = Some(high != *active_low);
                }
                Ok(state)
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for RigIo {
    fn set_output(&mut self, output: Output, active: bool) -> Result<()> {
        match (&mut self.lines, output) {
            (LineBank::Simulated(state), Output::WaterPort) => match &mut state.water_port {
                Some(level) => *level = active,
                None => return Err(HalError::NoSuchOutput(output)),
            },
            (LineBank::Physical { water_port, active_low, .. }, Output::WaterPort) => {
                let Some(line) = water_port else {
                    return Err(HalError::NoSuchOutput(output));
                };
                line.set_level(active != *active_low)
                    .map_err(|e| HalError::Write { output, detail: e.detail() })?;
            }
        }
        debug!("rig: {} -> {}", output, output.label(active));
        Ok(())
    }

    /// Both panels are always attempted; the first failure is returned.
    fn clear_displays(&mut self) -> Result<()> {
        let left = self.left.clear();
        let right = self.right.clear();
        left.and(right)
    }

    fn render(&mut self, side: Side, frame: &Frame) -> Result<()> {
        self.slot_mut(side).render(frame)
    }

    fn display_size(&self) -> (u32, u32) {
        self.left.frame.dimensions()
    }
}
