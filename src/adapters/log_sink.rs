//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one tagged line per [`RigEvent`] to
//! the process logger (stderr via `env_logger`).

use log::{error, info};

use crate::app::events::RigEvent;
use crate::app::ports::EventSink;
use crate::hal::state::Side;

/// Adapter that logs every [`RigEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RigEvent) {
        match event {
            RigEvent::Started(b) => {
                info!(
                    "START | bus={} left={} right={} lines={}",
                    b.bus,
                    b.display(Side::Left),
                    b.display(Side::Right),
                    b.lines,
                );
            }
            RigEvent::InputChanged { input, active } => {
                info!("INPUT | {} -> {}", input, input.label(*active));
            }
            RigEvent::OutputChanged { output, active } => {
                info!("OUTPUT | {} -> {}", output, output.label(*active));
            }
            RigEvent::DisplaysCleared => {
                info!("DISPLAY | cleared");
            }
            RigEvent::FrameRendered(side) => {
                info!("DISPLAY | {} rendered", side);
            }
            RigEvent::PollFailed(e) => {
                error!("POLL | {}", e);
            }
            RigEvent::Stopped { polls } => {
                info!("STOP | polls={}", polls);
            }
        }
    }
}
