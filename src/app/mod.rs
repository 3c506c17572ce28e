//! Application core — the status client and the port boundary.
//!
//! [`service::MonitorService`] is the poll-driven consumer of the rig.  It
//! and the HAL meet only through the **port traits** in [`ports`], which
//! keeps this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
