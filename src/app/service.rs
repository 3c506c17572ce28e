//! Status monitor — the poll-driven client of the rig.
//!
//! [`MonitorService`] turns raw snapshots into edge events and forwards
//! operator commands.  All I/O flows through port traits injected at call
//! sites, so the whole service runs against mock adapters in tests.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────┐ ──▶ EventSink
//!                  │  MonitorService  │
//! ActuatorPort ◀── └──────────────────┘
//! ```
//!
//! The service never retries: a failed poll is reported and handed back to
//! the caller, which ends the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{error, info, warn};

use crate::error::{HalError, Result};
use crate::hal::frame::Frame;
use crate::hal::state::{BackendReport, InputState, Output, SideSelect};

use super::commands::AppCommand;
use super::events::RigEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

#[derive(Debug, Default)]
pub struct MonitorService {
    last: Option<InputState>,
    polls: u64,
}

impl MonitorService {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, backends: BackendReport, sink: &mut impl EventSink) {
        sink.emit(&RigEvent::Started(backends));
        if backends.is_fully_simulated() {
            info!("Monitor started (simulated rig)");
        } else {
            info!("Monitor started");
        }
    }

    /// Best-effort wind-down: close the water port, blank the panels.
    /// Failures are logged, never returned.
    pub fn stop(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        match hw.set_output(Output::WaterPort, false) {
            Ok(()) | Err(HalError::NoSuchOutput(_)) => {}
            Err(e) => warn!("stop: {}", e),
        }
        if let Err(e) = hw.clear_displays() {
            warn!("stop: {}", e);
        }
        sink.emit(&RigEvent::Stopped { polls: self.polls });
    }

    /// Bring-up pattern, then poll every `interval` until `running` clears
    /// or a poll fails.
    ///
    /// [`stop`](Self::stop) runs on every exit path, including a failed
    /// bring-up command.  The first error is returned after it.
    pub fn run<H: SensorPort + ActuatorPort>(
        &mut self,
        hw: &mut H,
        sink: &mut impl EventSink,
        interval: Duration,
        running: &AtomicBool,
    ) -> Result<()> {
        let outcome = self.run_until_error(hw, sink, interval, running);
        if let Err(e) = &outcome {
            error!("monitor: {}; stopping", e);
        }
        self.stop(hw, sink);
        outcome
    }

    fn run_until_error<H: SensorPort + ActuatorPort>(
        &mut self,
        hw: &mut H,
        sink: &mut impl EventSink,
        interval: Duration,
        running: &AtomicBool,
    ) -> Result<()> {
        self.handle_command(AppCommand::ClearDisplays, hw, sink)?;
        self.handle_command(AppCommand::TestPattern(SideSelect::Both), hw, sink)?;

        while running.load(Ordering::SeqCst) {
            self.poll(hw, sink)?;
            std::thread::sleep(interval);
        }
        Ok(())
    }

    // ── Polling ───────────────────────────────────────────────

    /// Read one snapshot and emit an event per changed input.
    ///
    /// The first poll compares against an all-idle rig, so it reports every
    /// input that is already active.
    pub fn poll(
        &mut self,
        hw: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) -> Result<InputState> {
        let state = match hw.read_inputs() {
            Ok(state) => state,
            Err(e) => {
                sink.emit(&RigEvent::PollFailed(e.clone()));
                return Err(e);
            }
        };
        self.polls += 1;

        let prev = self.last.unwrap_or_default();
        for (input, active) in state.changed_since(&prev) {
            sink.emit(&RigEvent::InputChanged { input, active });
        }
        self.last = Some(state);
        Ok(state)
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::SetWaterPort(active) => {
                hw.set_output(Output::WaterPort, active)?;
                sink.emit(&RigEvent::OutputChanged {
                    output: Output::WaterPort,
                    active,
                });
            }
            AppCommand::ClearDisplays => {
                hw.clear_displays()?;
                sink.emit(&RigEvent::DisplaysCleared);
            }
            AppCommand::TestPattern(which) => {
                let (width, height) = hw.display_size();
                for &side in which.sides() {
                    hw.render(side, &Frame::test_pattern(side, width, height))?;
                    sink.emit(&RigEvent::FrameRendered(side));
                }
            }
            AppCommand::Render(side, frame) => {
                hw.render(side, &frame)?;
                sink.emit(&RigEvent::FrameRendered(side));
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot from the most recent successful poll.
    pub fn last_state(&self) -> Option<InputState> {
        self.last
    }

    /// Successful polls since start.
    pub fn polls(&self) -> u64 {
        self.polls
    }
}
