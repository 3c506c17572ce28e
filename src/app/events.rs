//! Outbound status events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, record in a test.

use crate::error::HalError;
use crate::hal::state::{BackendReport, Input, Output, Side};

#[derive(Debug, Clone, PartialEq)]
pub enum RigEvent {
    /// Monitoring started; carries the backend chosen per resource.
    Started(BackendReport),

    /// An input changed state since the previous poll.
    InputChanged { input: Input, active: bool },

    /// An output was commanded.
    OutputChanged { output: Output, active: bool },

    /// Both panels were blanked.
    DisplaysCleared,

    /// A frame was pushed to one panel.
    FrameRendered(Side),

    /// A poll failed; the session is expected to end.
    PollFailed(HalError),

    /// Monitoring stopped after `polls` successful reads.
    Stopped { polls: u64 },
}
