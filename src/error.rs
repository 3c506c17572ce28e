//! Unified error type for the rig I/O layer.
//!
//! Construction-time variants (`BusInit`, `DisplayInit`, `PinClaim`) never
//! reach the caller of [`RigIo::new`](crate::hal::RigIo::new): they are logged
//! and turned into a simulated backend.  Post-construction variants (`Read`,
//! `Write`, `Display`) propagate.  `Release` is always swallowed.

use core::fmt;

use crate::hal::state::{Line, Output, Side};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalError {
    /// The shared I2C bus could not be opened.
    BusInit { bus: u8, detail: String },
    /// A display did not answer its init sequence.
    DisplayInit { side: Side, address: u8, detail: String },
    /// A GPIO line could not be claimed.  Degrades the whole line group.
    PinClaim { pin: u8, detail: String },
    /// Reading a physical line failed mid-session.  Covers the water-port
    /// read-back as well as the inputs.
    Read { line: Line, detail: String },
    /// A physical output write (or read-back) failed mid-session.
    Write { output: Output, detail: String },
    /// Flushing a frame to a physical display failed.
    Display { side: Side, detail: String },
    /// Closing a bus or chip handle failed.
    Release(String),
    /// Caller-supplied frame does not match the panel geometry.
    FrameSize { expected: (u32, u32), actual: (u32, u32) },
    /// The rig has no such output line configured.
    NoSuchOutput(Output),
    /// Raw backend failure, before the HAL attaches context.
    Backend(String),
}

impl HalError {
    /// Wrap any backend error by its debug rendering.
    pub fn backend(err: impl fmt::Debug) -> Self {
        Self::Backend(format!("{err:?}"))
    }

    /// Detail string carried by the variant, for re-wrapping with context.
    pub fn detail(&self) -> String {
        match self {
            Self::BusInit { detail, .. }
            | Self::DisplayInit { detail, .. }
            | Self::PinClaim { detail, .. }
            | Self::Read { detail, .. }
            | Self::Write { detail, .. }
            | Self::Display { detail, .. } => detail.clone(),
            Self::Release(detail) | Self::Backend(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusInit { bus, detail } => write!(f, "I2C bus {bus} open failed: {detail}"),
            Self::DisplayInit { side, address, detail } => {
                write!(f, "{side} display (0x{address:02X}) init failed: {detail}")
            }
            Self::PinClaim { pin, detail } => write!(f, "GPIO {pin} claim failed: {detail}"),
            Self::Read { line, detail } => write!(f, "{line} read failed: {detail}"),
            Self::Write { output, detail } => write!(f, "{output} write failed: {detail}"),
            Self::Display { side, detail } => write!(f, "{side} display flush failed: {detail}"),
            Self::Release(detail) => write!(f, "release failed: {detail}"),
            Self::FrameSize { expected, actual } => write!(
                f,
                "frame is {}x{}, display is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::NoSuchOutput(output) => write!(f, "{output} is not wired on this rig"),
            Self::Backend(detail) => write!(f, "backend: {detail}"),
        }
    }
}

impl std::error::Error for HalError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, HalError>;
