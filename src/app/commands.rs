//! Inbound commands to the status monitor.
//!
//! One-shot actions requested by the operator (or a test harness) that the
//! [`MonitorService`](super::service::MonitorService) forwards to the rig.

use crate::hal::frame::Frame;
use crate::hal::state::{Side, SideSelect};

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Open (`true`) or close the water-port solenoid.
    SetWaterPort(bool),

    /// Blank both status panels.
    ClearDisplays,

    /// Draw the bring-up pattern on one or both panels.
    TestPattern(SideSelect),

    /// Show caller-drawn content on one panel.
    Render(Side, Frame),
}
